use crate::db::MovieStore;

/// Shortest query, in characters, that produces suggestions
pub const MIN_QUERY_CHARS: usize = 2;

/// Autocomplete lookup over catalog titles
///
/// Returns up to `limit` titles containing `query` ignoring case, in table
/// order. Short queries and an unloaded catalog yield no suggestions rather
/// than an error.
pub fn search_titles(store: Option<&MovieStore>, query: &str, limit: usize) -> Vec<String> {
    let Some(store) = store else {
        return Vec::new();
    };
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    store
        .title_matches(&needle)
        .take(limit)
        .map(|movie| movie.title.clone())
        .collect()
}
