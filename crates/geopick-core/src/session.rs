// crates/geopick-core/src/session.rs
use crate::error::Result;
use crate::model::{City, Country, LocationSelection, State};
use crate::repository::LocationRepository;
use crate::traits::LocationProvider;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Position of a session in the country → state → city chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionStage {
    Empty,
    CountrySelected,
    StateSelected,
    CitySelected,
}

#[derive(Debug, Default)]
struct Selection {
    country: Option<Country>,
    state: Option<State>,
    city: Option<City>,
}

/// Cascading country → state → city selection on top of a
/// [`LocationRepository`].
///
/// Changing a level clears every level below it, and it does so before the
/// children of the new pick are fetched, so no caller ever sees a stale
/// state or city next to a new parent. If that fetch then fails, the
/// selection stays as it is after the clear.
///
/// All operations on one session are serialized: a select-then-fetch runs
/// to completion before the next call on the same session starts.
///
/// # Example
///
/// ```no_run
/// use geopick_core::provider::BundledProvider;
/// use geopick_core::{LocationRepository, SelectionSession};
/// use std::sync::Arc;
///
/// # async fn run() -> geopick_core::Result<()> {
/// let repo = Arc::new(LocationRepository::new(BundledProvider::default()));
/// let session = SelectionSession::new(repo);
///
/// let countries = session.load_countries(false).await?;
/// let states = session.select_country(countries.first().cloned(), false).await?;
/// let cities = session.select_state(states.first().cloned(), false).await?;
/// session.select_city(cities.first().cloned()).await;
///
/// println!("{:?}", session.response().await);
/// # Ok(())
/// # }
/// ```
pub struct SelectionSession<P> {
    repository: Arc<LocationRepository<P>>,
    selection: Mutex<Selection>,
}

impl<P: LocationProvider> SelectionSession<P> {
    pub fn new(repository: Arc<LocationRepository<P>>) -> Self {
        Self {
            repository,
            selection: Mutex::new(Selection::default()),
        }
    }

    pub fn repository(&self) -> &Arc<LocationRepository<P>> {
        &self.repository
    }

    pub async fn load_countries(&self, force_refresh: bool) -> Result<Vec<Country>> {
        let _serial = self.selection.lock().await;
        self.repository.countries(force_refresh).await
    }

    /// Selects `country` (or clears it with `None`) and returns its states.
    ///
    /// Re-selecting the country already held keeps the state and city.
    pub async fn select_country(
        &self,
        country: Option<Country>,
        force_refresh: bool,
    ) -> Result<Vec<State>> {
        let mut sel = self.selection.lock().await;
        if sel.country.as_ref().map(|c| c.id) != country.as_ref().map(|c| c.id) {
            debug!(
                from = ?sel.country.as_ref().map(|c| c.id),
                to = ?country.as_ref().map(|c| c.id),
                "country changed"
            );
            sel.country = country;
            sel.state = None;
            sel.city = None;
        }

        let Some(country_id) = sel.country.as_ref().map(|c| c.id) else {
            return Ok(Vec::new());
        };
        self.repository.states(country_id, force_refresh).await
    }

    /// Selects `state` (or clears it with `None`) and returns its cities.
    ///
    /// Re-selecting the state already held keeps the city.
    ///
    /// `state` is expected to come from the list returned for the selected
    /// country. It is not checked against that country: a state with another
    /// `country_id` is stored as given and only logged.
    pub async fn select_state(
        &self,
        state: Option<State>,
        force_refresh: bool,
    ) -> Result<Vec<City>> {
        let mut sel = self.selection.lock().await;
        if let (Some(held), Some(new)) = (&sel.country, &state) {
            if held.id != new.country_id {
                debug!(
                    country_id = held.id,
                    state_id = new.id,
                    state_country_id = new.country_id,
                    "state does not belong to the selected country"
                );
            }
        }
        if sel.state.as_ref().map(|s| s.id) != state.as_ref().map(|s| s.id) {
            debug!(
                from = ?sel.state.as_ref().map(|s| s.id),
                to = ?state.as_ref().map(|s| s.id),
                "state changed"
            );
            sel.state = state;
            sel.city = None;
        }

        let Some(state_id) = sel.state.as_ref().map(|s| s.id) else {
            return Ok(Vec::new());
        };
        self.repository.cities(state_id, force_refresh).await
    }

    pub async fn select_city(&self, city: Option<City>) {
        self.selection.lock().await.city = city;
    }

    pub async fn reset(&self) {
        *self.selection.lock().await = Selection::default();
    }

    pub async fn selected_country(&self) -> Option<Country> {
        self.selection.lock().await.country.clone()
    }

    pub async fn selected_state(&self) -> Option<State> {
        self.selection.lock().await.state.clone()
    }

    pub async fn selected_city(&self) -> Option<City> {
        self.selection.lock().await.city.clone()
    }

    pub async fn stage(&self) -> SelectionStage {
        let sel = self.selection.lock().await;
        match (&sel.country, &sel.state, &sel.city) {
            (None, _, _) => SelectionStage::Empty,
            (Some(_), None, _) => SelectionStage::CountrySelected,
            (Some(_), Some(_), None) => SelectionStage::StateSelected,
            (Some(_), Some(_), Some(_)) => SelectionStage::CitySelected,
        }
    }

    /// The current picks as a [`LocationSelection`]. Custom flags are always
    /// `false` here; free text is merged in by [`LocationSelection::compose`].
    pub async fn response(&self) -> LocationSelection {
        let sel = self.selection.lock().await;
        LocationSelection {
            country_id: sel.country.as_ref().map(|c| c.id),
            country_name: sel.country.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            state_id: sel.state.as_ref().map(|s| s.id),
            state_name: sel.state.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            city_id: sel.city.as_ref().map(|c| c.id),
            city_name: sel.city.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            ..LocationSelection::default()
        }
    }
}
