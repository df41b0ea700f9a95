use std::{collections::HashMap, fs::File, io::Read, path::Path};

use chrono::{DateTime, Utc};
use csv::StringRecord;

use super::{ColumnMapping, LoadError};
use crate::models::Movie;

pub const DEFAULT_RELEASE_YEAR: i32 = 2020;
pub const DEFAULT_GENRES: &str = "Unknown";
pub const DEFAULT_RATING: f64 = 7.0;

/// Immutable in-memory movie catalog
///
/// Rows keep the order of the source file; every "first match" in the query
/// layer refers to this order. Titles are unique.
#[derive(Debug)]
pub struct MovieStore {
    movies: Vec<Movie>,
    lowercase_titles: Vec<String>,
    by_title: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl MovieStore {
    /// Loads the catalog from a CSV file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            total_movies = store.len(),
            "Movie catalog loaded"
        );

        Ok(store)
    }

    /// Parses CSV catalog data from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mapping = ColumnMapping::resolve(reader.headers()?)?;
        tracing::debug!(?mapping, "Resolved catalog columns");

        let mut movies = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            movies.push(parse_row(&record, &mapping, index + 1)?);
        }

        Self::from_movies(movies)
    }

    /// Builds a catalog from already-parsed rows
    ///
    /// Later rows repeating an earlier title are dropped.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self, LoadError> {
        let mut store = Self {
            movies: Vec::with_capacity(movies.len()),
            lowercase_titles: Vec::with_capacity(movies.len()),
            by_title: HashMap::with_capacity(movies.len()),
            loaded_at: Utc::now(),
        };

        for movie in movies {
            if store.by_title.contains_key(&movie.title) {
                tracing::warn!(title = %movie.title, "Skipping duplicate title");
                continue;
            }
            store.by_title.insert(movie.title.clone(), store.movies.len());
            store.lowercase_titles.push(movie.title.to_lowercase());
            store.movies.push(movie);
        }

        if store.movies.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All rows in table order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.by_title.get(title).map(|&index| &self.movies[index])
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Movies whose lowercase title contains `needle`, in table order
    ///
    /// `needle` must already be lowercase. Matching is a literal substring
    /// test.
    pub fn title_matches<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a Movie> + 'a {
        self.lowercase_titles
            .iter()
            .zip(&self.movies)
            .filter(move |(lower, _)| lower.contains(needle))
            .map(|(_, movie)| movie)
    }

    /// The movie whose lowercase title equals `needle` exactly
    pub fn find_title_ignore_case(&self, needle: &str) -> Option<&Movie> {
        self.lowercase_titles
            .iter()
            .position(|lower| lower == needle)
            .map(|index| &self.movies[index])
    }
}

fn parse_row(record: &StringRecord, mapping: &ColumnMapping, row: usize) -> Result<Movie, LoadError> {
    let title = record.get(mapping.title).unwrap_or_default().trim();
    if title.is_empty() {
        return Err(LoadError::InvalidValue {
            row,
            column: "title",
            value: title.to_string(),
        });
    }

    let cluster_cell = record.get(mapping.cluster).unwrap_or_default().trim();
    let cluster = parse_integer(cluster_cell).ok_or_else(|| LoadError::InvalidValue {
        row,
        column: "cluster",
        value: cluster_cell.to_string(),
    })?;

    let release_year = match optional_cell(record, mapping.release_year) {
        None => DEFAULT_RELEASE_YEAR,
        Some(cell) => parse_integer(cell)
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| LoadError::InvalidValue {
                row,
                column: "release_year",
                value: cell.to_string(),
            })?,
    };

    let genres = optional_cell(record, mapping.genres)
        .unwrap_or(DEFAULT_GENRES)
        .to_string();

    let rating = match optional_cell(record, mapping.rating) {
        None => DEFAULT_RATING,
        Some(cell) => cell
            .parse::<f64>()
            .ok()
            .filter(|rating| rating.is_finite())
            .ok_or_else(|| LoadError::InvalidValue {
                row,
                column: "rating",
                value: cell.to_string(),
            })?,
    };

    Ok(Movie {
        title: title.to_string(),
        cluster,
        release_year,
        genres,
        rating,
    })
}

/// Trimmed cell content, or `None` when the column is absent or the cell is
/// blank (pandas writes missing values as empty cells or `NaN`)
fn optional_cell(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|index| record.get(index))
        .map(str::trim)
        .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("nan"))
}

/// Parses `3` as well as integral floats like `3.0`
fn parse_integer(cell: &str) -> Option<i64> {
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && value.fract() == 0.0)
            .filter(|value| value.abs() < i64::MAX as f64)
            .map(|value| value as i64)
    })
}
