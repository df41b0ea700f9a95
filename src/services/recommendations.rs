use rand::{seq::SliceRandom, Rng};

use crate::{
    db::MovieStore,
    error::{AppError, AppResult},
    models::{Movie, Recommendation, RecommendationOutcome},
};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found in database. Please try another search.";
pub const OUTLIER_MESSAGE: &str = "Movie is an outlier. Showing top-rated movies instead.";

/// Validates a client-supplied recommendation count
pub fn validate_count(count: i64) -> AppResult<usize> {
    usize::try_from(count)
        .ok()
        .filter(|&count| count > 0)
        .ok_or_else(invalid_count)
}

/// Rejects a movie name that is blank after trimming
pub fn validate_movie_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput("Movie name cannot be empty".to_string()));
    }
    Ok(())
}

fn invalid_count() -> AppError {
    AppError::InvalidInput("Number of recommendations must be a positive integer".to_string())
}

/// Recommends movies similar to the one named by `query`
///
/// The anchor is the movie whose title equals the query ignoring case, or
/// failing that the first movie in table order whose title contains it.
/// Movies sharing the anchor's cluster are sampled uniformly without
/// replacement; when the anchor is an outlier the `count` best-rated movies of
/// the whole catalog are returned instead, tagged as a warning.
pub fn recommend<R: Rng + ?Sized>(
    store: &MovieStore,
    query: &str,
    count: usize,
    rng: &mut R,
) -> AppResult<RecommendationOutcome> {
    validate_movie_name(query)?;
    let needle = query.trim().to_lowercase();
    if count == 0 {
        return Err(invalid_count());
    }

    let anchor = find_anchor(store, &needle)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    if anchor.is_outlier() {
        let recommendations: Vec<Recommendation> = top_rated(store, count)
            .into_iter()
            .map(Recommendation::from)
            .collect();

        tracing::info!(
            anchor = %anchor.title,
            returned = recommendations.len(),
            "Anchor is an outlier, falling back to top-rated movies"
        );

        return Ok(RecommendationOutcome::Warning {
            message: OUTLIER_MESSAGE.to_string(),
            input_movie: anchor.title.clone(),
            cluster: anchor.cluster,
            total_cluster_movies: recommendations.len(),
            recommendations,
        });
    }

    let peers: Vec<&Movie> = store
        .movies()
        .iter()
        .filter(|movie| movie.cluster == anchor.cluster && movie.title != anchor.title)
        .collect();
    let total_cluster_movies = peers.len() + 1;

    let picked: Vec<&Movie> = if peers.len() < count {
        peers
    } else {
        peers.choose_multiple(rng, count).copied().collect()
    };

    tracing::info!(
        anchor = %anchor.title,
        cluster = anchor.cluster,
        cluster_size = total_cluster_movies,
        returned = picked.len(),
        "Recommendations selected"
    );

    Ok(RecommendationOutcome::Success {
        input_movie: anchor.title.clone(),
        cluster: anchor.cluster,
        total_cluster_movies,
        recommendations: picked.into_iter().map(Recommendation::from).collect(),
    })
}

fn find_anchor<'a>(store: &'a MovieStore, needle: &'a str) -> Option<&'a Movie> {
    store
        .find_title_ignore_case(needle)
        .or_else(|| store.title_matches(needle).next())
}

/// The `count` highest-rated movies, ties keeping table order
fn top_rated(store: &MovieStore, count: usize) -> Vec<&Movie> {
    let mut ranked: Vec<&Movie> = store.movies().iter().collect();
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn movie(title: &str, cluster: i64, rating: f64) -> Movie {
        Movie {
            title: title.to_string(),
            cluster,
            release_year: 2010,
            genres: "Drama".to_string(),
            rating,
        }
    }

    fn sample_store() -> MovieStore {
        MovieStore::from_movies(vec![
            movie("Inception", 2, 8.8),
            movie("Interstellar", 2, 8.6),
            movie("Tenet", 2, 7.3),
            movie("Sharknado", -1, 3.0),
            movie("Parasite", -1, 8.6),
        ])
        .unwrap()
    }

    fn large_cluster_store() -> MovieStore {
        let mut movies: Vec<Movie> = (0..20)
            .map(|i| movie(&format!("Western {i}"), 7, 6.0))
            .collect();
        movies.push(movie("Noir", 3, 7.0));
        MovieStore::from_movies(movies).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn titles(outcome: &RecommendationOutcome) -> HashSet<String> {
        outcome
            .recommendations()
            .iter()
            .map(|r| r.title.clone())
            .collect()
    }

    #[test]
    fn test_same_cluster_recommendations() {
        let store = sample_store();
        let outcome = recommend(&store, "incep", 2, &mut rng()).unwrap();

        assert!(!outcome.is_warning());
        assert_eq!(outcome.input_movie(), "Inception");
        assert_eq!(outcome.cluster(), 2);
        assert_eq!(
            titles(&outcome),
            HashSet::from(["Interstellar".to_string(), "Tenet".to_string()])
        );
        match outcome {
            RecommendationOutcome::Success { total_cluster_movies, .. } => {
                assert_eq!(total_cluster_movies, 3)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_small_cluster_returns_all_peers_every_time() {
        let store = sample_store();

        let first = recommend(&store, "Tenet", 5, &mut rng()).unwrap();
        let second = recommend(&store, "Tenet", 5, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(first.recommendations().len(), 2);
        assert_eq!(first.recommendations(), second.recommendations());
    }

    #[test]
    fn test_outlier_falls_back_to_top_rated() {
        let store = sample_store();
        let outcome = recommend(&store, "sharkn", 1, &mut rng()).unwrap();

        assert!(outcome.is_warning());
        assert_eq!(outcome.input_movie(), "Sharknado");
        assert_eq!(outcome.cluster(), -1);
        assert_eq!(outcome.recommendations().len(), 1);
        assert_eq!(outcome.recommendations()[0].title, "Inception");
    }

    #[test]
    fn test_outlier_top_rated_ties_keep_table_order() {
        let store = sample_store();
        let outcome = recommend(&store, "parasite", 3, &mut rng()).unwrap();

        let ordered: Vec<&str> = outcome
            .recommendations()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(ordered, vec!["Inception", "Interstellar", "Parasite"]);
        match outcome {
            RecommendationOutcome::Warning { message, total_cluster_movies, .. } => {
                assert_eq!(message, OUTLIER_MESSAGE);
                assert_eq!(total_cluster_movies, 3);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_outlier_example_from_small_catalog() {
        let store = MovieStore::from_movies(vec![
            movie("Inception", 2, 0.0),
            movie("Interstellar", 2, 0.0),
            movie("Tenet", 2, 0.0),
            movie("Sharknado", -1, 3.0),
            movie("Parasite", -1, 8.6),
        ])
        .unwrap();

        let outcome = recommend(&store, "sharkn", 1, &mut rng()).unwrap();
        assert!(outcome.is_warning());
        assert_eq!(outcome.recommendations()[0].title, "Parasite");
    }

    #[test]
    fn test_large_cluster_is_sampled_to_exact_count() {
        let store = large_cluster_store();
        let mut rng = rng();

        for _ in 0..10 {
            let outcome = recommend(&store, "western 3", 5, &mut rng).unwrap();
            let picked = titles(&outcome);

            assert_eq!(outcome.input_movie(), "Western 3");
            assert_eq!(outcome.recommendations().len(), 5);
            assert_eq!(picked.len(), 5, "sampling must not repeat titles");
            assert!(!picked.contains("Western 3"));
            for title in &picked {
                assert_eq!(store.get(title).unwrap().cluster, 7);
            }
        }
    }

    #[test]
    fn test_exact_title_beats_earlier_substring_match() {
        let store = MovieStore::from_movies(vec![
            movie("Alien Resurrection", 1, 6.2),
            movie("Alien", 1, 8.5),
        ])
        .unwrap();
        let outcome = recommend(&store, "alien", 3, &mut rng()).unwrap();
        assert_eq!(outcome.input_movie(), "Alien");
    }

    #[test]
    fn test_first_substring_match_in_table_order() {
        let store = sample_store();
        let outcome = recommend(&store, "in", 1, &mut rng()).unwrap();
        assert_eq!(outcome.input_movie(), "Inception");
    }

    #[test]
    fn test_query_is_trimmed_and_case_folded() {
        let store = sample_store();
        let outcome = recommend(&store, "  INTERSTELLAR \n", 1, &mut rng()).unwrap();
        assert_eq!(outcome.input_movie(), "Interstellar");
    }

    #[test]
    fn test_unknown_title() {
        let store = sample_store();
        let err = recommend(&store, "xyz123", 5, &mut rng()).unwrap_err();
        assert_eq!(err, AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    #[test]
    fn test_blank_query_is_invalid() {
        let store = sample_store();
        let err = recommend(&store, "   ", 5, &mut rng()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_count_is_invalid() {
        let store = sample_store();
        let err = recommend(&store, "Inception", 0, &mut rng()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_movie_name() {
        assert_eq!(validate_movie_name("Heat"), Ok(()));
        assert_eq!(
            validate_movie_name(" \t"),
            Err(AppError::InvalidInput("Movie name cannot be empty".to_string()))
        );
    }

    #[test]
    fn test_validate_count() {
        assert_eq!(validate_count(5), Ok(5));
        assert!(matches!(validate_count(0), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_count(-3), Err(AppError::InvalidInput(_))));
    }
}
