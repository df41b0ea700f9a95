use std::collections::HashSet;

use crate::{
    db::MovieStore,
    models::{CatalogStats, YearRange},
};

/// Aggregates catalog-wide figures; outliers do not count as a cluster
pub fn summarize(store: &MovieStore) -> CatalogStats {
    let movies = store.movies();

    let clusters: HashSet<i64> = movies
        .iter()
        .filter(|movie| !movie.is_outlier())
        .map(|movie| movie.cluster)
        .collect();
    let noise_points = movies.iter().filter(|movie| movie.is_outlier()).count();

    let years = movies.iter().map(|movie| movie.release_year);
    let year_range = YearRange {
        min: years.clone().min().unwrap_or_default(),
        max: years.max().unwrap_or_default(),
    };

    CatalogStats {
        total_movies: movies.len(),
        total_clusters: clusters.len(),
        noise_points,
        year_range,
    }
}
