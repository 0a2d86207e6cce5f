// crates/geopick-core/src/traits.rs
use crate::error::Result;
use crate::model::{City, Country, State};
use crate::text::{equals_folded, fold_key};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of country / state / city data.
///
/// The three operations are the whole contract; which source answers them
/// (HTTP, bundled dataset, or a composition) is decided when the provider is
/// constructed and injected into a [`crate::LocationRepository`].
///
/// Unknown parent ids are not an error: a provider returns an empty list.
///
/// # Example
///
/// ```no_run
/// use geopick_core::provider::BundledProvider;
/// use geopick_core::LocationProvider;
///
/// # async fn run() -> geopick_core::Result<()> {
/// let provider = BundledProvider::from_path("data/countries+states+cities.json");
/// for country in provider.fetch_countries().await?.iter().take(5) {
///     println!("{} ({})", country.name, country.id);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<Country>>;

    async fn fetch_states(&self, country_id: i64) -> Result<Vec<State>>;

    async fn fetch_cities(&self, state_id: i64) -> Result<Vec<City>>;
}

#[async_trait]
impl<P: LocationProvider + ?Sized> LocationProvider for Arc<P> {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        (**self).fetch_countries().await
    }

    async fn fetch_states(&self, country_id: i64) -> Result<Vec<State>> {
        (**self).fetch_states(country_id).await
    }

    async fn fetch_cities(&self, state_id: i64) -> Result<Vec<City>> {
        (**self).fetch_cities(state_id).await
    }
}

#[async_trait]
impl<P: LocationProvider + ?Sized> LocationProvider for Box<P> {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        (**self).fetch_countries().await
    }

    async fn fetch_states(&self, country_id: i64) -> Result<Vec<State>> {
        (**self).fetch_states(country_id).await
    }

    async fn fetch_cities(&self, state_id: i64) -> Result<Vec<City>> {
        (**self).fetch_cities(state_id).await
    }
}

/// Accent- and case-insensitive name checks, used by
/// [`crate::text::filter_by_name`] to narrow picker lists.
///
/// ```rust
/// use geopick_core::{NameMatch, State};
///
/// let quebec = State::new(873, "Québec", 39);
/// assert!(quebec.is_named("QUEBEC"));
/// assert!(quebec.name_contains("bec"));
/// assert!(!quebec.name_contains("ontario"));
/// ```
pub trait NameMatch {
    fn name_str(&self) -> &str;

    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for State {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        &self.name
    }
}
