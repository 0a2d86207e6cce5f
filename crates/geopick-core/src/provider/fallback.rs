// crates/geopick-core/src/provider/fallback.rs
use crate::error::Result;
use crate::model::{City, Country, State};
use crate::traits::LocationProvider;
use async_trait::async_trait;
use tracing::debug;

/// Tries `primary`, and on any error (cancellation included) repeats the
/// same call on `fallback`.
///
/// The primary's error is only logged. Nothing is remembered between calls,
/// so every call pays for a failing primary again.
pub struct FallbackProvider<P, F> {
    primary: P,
    fallback: F,
}

impl<P: LocationProvider, F: LocationProvider> FallbackProvider<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

#[async_trait]
impl<P: LocationProvider, F: LocationProvider> LocationProvider for FallbackProvider<P, F> {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        match self.primary.fetch_countries().await {
            Ok(countries) => Ok(countries),
            Err(e) => {
                debug!(error = %e, "primary failed fetching countries, using fallback");
                self.fallback.fetch_countries().await
            }
        }
    }

    async fn fetch_states(&self, country_id: i64) -> Result<Vec<State>> {
        match self.primary.fetch_states(country_id).await {
            Ok(states) => Ok(states),
            Err(e) => {
                debug!(country_id, error = %e, "primary failed fetching states, using fallback");
                self.fallback.fetch_states(country_id).await
            }
        }
    }

    async fn fetch_cities(&self, state_id: i64) -> Result<Vec<City>> {
        match self.primary.fetch_cities(state_id).await {
            Ok(cities) => Ok(cities),
            Err(e) => {
                debug!(state_id, error = %e, "primary failed fetching cities, using fallback");
                self.fallback.fetch_cities(state_id).await
            }
        }
    }
}
