use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cluster label reserved for rows the offline clustering marked as noise
pub const OUTLIER_CLUSTER: i64 = -1;

/// A single row of the movie catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: String,
    pub cluster: i64,
    pub release_year: i32,
    pub genres: String,
    pub rating: f64,
}

impl Movie {
    /// Whether the clustering left this movie outside every dense group
    pub fn is_outlier(&self) -> bool {
        self.cluster == OUTLIER_CLUSTER
    }
}

/// A recommended movie as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f64,
}

impl From<&Movie> for Recommendation {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.release_year,
            genre: movie.genres.clone(),
            rating: movie.rating,
        }
    }
}

/// Outcome of a successful recommendation query
///
/// Errors travel separately as [`crate::error::AppError`] and serialize with
/// `"status": "error"`, so the three tags share one JSON shape on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecommendationOutcome {
    /// Recommendations drawn from the anchor's own cluster
    Success {
        input_movie: String,
        cluster: i64,
        total_cluster_movies: usize,
        recommendations: Vec<Recommendation>,
    },
    /// The anchor is an outlier; top-rated movies stand in for its cluster
    Warning {
        message: String,
        input_movie: String,
        cluster: i64,
        total_cluster_movies: usize,
        recommendations: Vec<Recommendation>,
    },
}

impl RecommendationOutcome {
    pub fn input_movie(&self) -> &str {
        match self {
            Self::Success { input_movie, .. } | Self::Warning { input_movie, .. } => input_movie,
        }
    }

    pub fn cluster(&self) -> i64 {
        match self {
            Self::Success { cluster, .. } | Self::Warning { cluster, .. } => *cluster,
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::Success { recommendations, .. } | Self::Warning { recommendations, .. } => {
                recommendations
            }
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }
}

/// Request body for the recommendation endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub movie_name: Option<String>,
    pub n_recommendations: Option<i64>,
}

/// Inclusive range of release years in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Aggregate figures over the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_movies: usize,
    pub total_clusters: usize,
    pub noise_points: usize,
    pub year_range: YearRange,
}

/// Health probe payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
    pub total_movies: usize,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}
