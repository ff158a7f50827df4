use tokio::sync::RwLock;
use tracing::{info, warn};

use super::facets::{build_facets, FacetGroup};
use super::filter::{filter_movies, FilterParams};
use super::record::{Flag, FlagField, MovieRecord};
use super::store::{Catalog, DatasetError};

/// Shared handle on the catalog.
///
/// Every operation takes the lock exactly once, so a request sees either
/// all of a mutation or none of it. Reads share the lock, writes are
/// exclusive.
pub struct CatalogRepo {
    catalog: RwLock<Catalog>,
}

impl CatalogRepo {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    pub fn load(dataset: Option<&str>) -> Result<Self, DatasetError> {
        Ok(Self::new(Catalog::load(dataset)?))
    }

    pub async fn filter(&self, params: &FilterParams) -> Vec<MovieRecord> {
        let catalog = self.catalog.read().await;
        filter_movies(&catalog, params).into_iter().cloned().collect()
    }

    pub async fn get_by_title(&self, title: &str) -> Option<MovieRecord> {
        let catalog = self.catalog.read().await;
        catalog.get(title).cloned()
    }

    pub async fn get_by_imdb_id(&self, imdb_id: &str) -> Option<MovieRecord> {
        let catalog = self.catalog.read().await;
        catalog.get_by_imdb_id(imdb_id).cloned()
    }

    pub async fn facets(&self) -> Vec<FacetGroup> {
        let catalog = self.catalog.read().await;
        build_facets(&catalog)
    }

    /// Overwrite one flag on the record with `imdb_id`.
    /// Returns false if the id is unknown.
    pub async fn set_flag(&self, imdb_id: &str, field: FlagField, value: Flag) -> bool {
        let mut catalog = self.catalog.write().await;

        match catalog.get_by_imdb_id_mut(imdb_id) {
            Some(movie) => {
                movie.set_flag(field, value);
                info!(
                    "Set {} = {} on {} ({})",
                    field.as_str(),
                    value.as_str(),
                    movie.title,
                    imdb_id
                );
                true
            }
            None => {
                warn!("Cannot set {}: unknown imdbID {}", field.as_str(), imdb_id);
                false
            }
        }
    }
}
