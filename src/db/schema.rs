use csv::StringRecord;

use super::LoadError;

pub const TITLE_ALIASES: &[&str] = &["title"];
pub const CLUSTER_ALIASES: &[&str] = &["dbscan_cluster", "dbscan_clusters", "cluster", "cluster_label"];
pub const YEAR_ALIASES: &[&str] = &["release_year", "year"];
pub const GENRES_ALIASES: &[&str] = &["genres", "genre"];
pub const RATING_ALIASES: &[&str] = &["imdb_score", "rating"];

/// Column positions resolved from a catalog header row
///
/// Resolution happens once per load. Aliases are tried in order and the first
/// header present wins, so a file carrying both `dbscan_cluster` and `cluster`
/// reads the former.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub title: usize,
    pub cluster: usize,
    pub release_year: Option<usize>,
    pub genres: Option<usize>,
    pub rating: Option<usize>,
}

impl ColumnMapping {
    /// Resolves the mapping, failing if a required column has no known alias
    pub fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let title = find_column(headers, TITLE_ALIASES).ok_or(LoadError::ColumnMissing {
            column: "Title",
            aliases: TITLE_ALIASES,
        })?;
        let cluster = find_column(headers, CLUSTER_ALIASES).ok_or(LoadError::ColumnMissing {
            column: "Cluster",
            aliases: CLUSTER_ALIASES,
        })?;

        Ok(Self {
            title,
            cluster,
            release_year: find_column(headers, YEAR_ALIASES),
            genres: find_column(headers, GENRES_ALIASES),
            rating: find_column(headers, RATING_ALIASES),
        })
    }
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(alias))
    })
}
