use std::path::PathBuf;

pub mod catalog;
pub mod schema;

pub use catalog::MovieStore;
pub use schema::ColumnMapping;

/// Errors raised while loading the movie catalog at startup
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{column} column not found in dataset (expected one of: {})", .aliases.join(", "))]
    ColumnMissing {
        column: &'static str,
        aliases: &'static [&'static str],
    },

    #[error("Invalid {column} value {value:?} in row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Dataset contains no movies")]
    Empty,
}
