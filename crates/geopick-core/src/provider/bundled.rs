// crates/geopick-core/src/provider/bundled.rs
use crate::common::DbStats;
use crate::error::{GeoError, Result};
use crate::loader::{default_dataset_path, DocumentSource, FileSource, StaticSource};
use crate::model::{flatten, City, CountriesRaw, Country, LocationIndex, State};
use crate::traits::LocationProvider;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Provider serving a nested `countries+states+cities` document.
///
/// The document is read and flattened once, on the first call of any
/// operation. Concurrent first callers all await that single load. A failed
/// load is not remembered, so a later call tries again.
///
/// Unknown country or state ids yield empty lists.
pub struct BundledProvider {
    source: Box<dyn DocumentSource>,
    index: OnceCell<Arc<LocationIndex>>,
}

impl BundledProvider {
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            index: OnceCell::new(),
        }
    }

    /// Reads the dataset from a file (`.json`, or `.json.gz` with the
    /// `compact` feature).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }

    /// Serves a dataset embedded in the binary.
    pub fn from_static(name: &'static str, bytes: &'static [u8]) -> Self {
        Self::new(StaticSource::new(name, bytes))
    }

    /// Loads (if needed) and returns the flattened index.
    pub async fn index(&self) -> Result<Arc<LocationIndex>> {
        self.index
            .get_or_try_init(|| self.load())
            .await
            .cloned()
    }

    /// `true` once the document has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.index.initialized()
    }

    pub async fn stats(&self) -> Result<DbStats> {
        Ok(self.index().await?.stats())
    }

    async fn load(&self) -> Result<Arc<LocationIndex>> {
        let bytes = self.source.read().await?;
        let raw: CountriesRaw = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(resource = self.source.name(), error = %e, "dataset has an invalid shape");
            GeoError::DecodingFailed
        })?;

        let index = flatten(raw);
        let stats = index.stats();
        info!(
            resource = self.source.name(),
            countries = stats.countries,
            states = stats.states,
            cities = stats.cities,
            "dataset indexed"
        );
        Ok(Arc::new(index))
    }
}

impl Default for BundledProvider {
    /// The dataset shipped in the crate's `data/` directory.
    fn default() -> Self {
        Self::from_path(default_dataset_path())
    }
}

#[async_trait]
impl LocationProvider for BundledProvider {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        Ok(self.index().await?.countries.clone())
    }

    async fn fetch_states(&self, country_id: i64) -> Result<Vec<State>> {
        Ok(self.index().await?.states_of(country_id))
    }

    async fn fetch_cities(&self, state_id: i64) -> Result<Vec<City>> {
        Ok(self.index().await?.cities_of(state_id))
    }
}
