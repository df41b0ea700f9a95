use std::{path::PathBuf, sync::Arc};

use crate::{
    config::Config,
    db::{LoadError, MovieStore},
    error::{AppError, AppResult},
};

/// The movie catalog, or the reason it could not be loaded
///
/// A failed load leaves the service running without data; every request that
/// needs the catalog reports the failure instead.
#[derive(Clone, Debug)]
pub enum Catalog {
    Loaded(Arc<MovieStore>),
    Unavailable(Arc<LoadError>),
}

impl Catalog {
    /// Loads the catalog, logging rather than propagating failure
    pub fn load(config: &Config) -> Self {
        match MovieStore::load(&config.data_path) {
            Ok(store) => Self::Loaded(Arc::new(store)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %config.data_path.display(),
                    "Movie catalog unavailable, serving without data"
                );
                Self::Unavailable(Arc::new(e))
            }
        }
    }

    pub fn get(&self) -> Option<&MovieStore> {
        match self {
            Self::Loaded(store) => Some(store.as_ref()),
            Self::Unavailable(_) => None,
        }
    }

    /// The loaded store, or the error a request should report
    pub fn store(&self) -> AppResult<&MovieStore> {
        match self {
            Self::Loaded(store) => Ok(store.as_ref()),
            Self::Unavailable(e) => Err(match e.as_ref() {
                LoadError::ColumnMissing { .. } => AppError::ColumnMissing(e.to_string()),
                _ => AppError::DataUnavailable(format!("Movie data not loaded: {e}")),
            }),
        }
    }
}

impl From<MovieStore> for Catalog {
    fn from(store: MovieStore) -> Self {
        Self::Loaded(Arc::new(store))
    }
}

impl From<LoadError> for Catalog {
    fn from(error: LoadError) -> Self {
        Self::Unavailable(Arc::new(error))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub static_dir: PathBuf,
    pub default_recommendations: i64,
    pub default_search_limit: usize,
}

impl AppState {
    pub fn new(catalog: impl Into<Catalog>, config: &Config) -> Self {
        Self {
            catalog: catalog.into(),
            static_dir: config.static_dir.clone(),
            default_recommendations: config.default_recommendations,
            default_search_limit: config.default_search_limit,
        }
    }

    /// Builds the state, loading the catalog named by the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(Catalog::load(config), config)
    }
}
