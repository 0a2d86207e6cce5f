// crates/geopick-core/src/repository.rs
use crate::error::Result;
use crate::model::{City, Country, State};
use crate::traits::LocationProvider;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// One cache entry. The slot lock is held for the whole fetch, which is what
/// keeps a key to a single in-flight request.
type Slot<T> = Arc<Mutex<Option<Vec<T>>>>;

#[derive(Default)]
struct Caches {
    countries: Slot<Country>,
    states: HashMap<i64, Slot<State>>,
    cities: HashMap<i64, Slot<City>>,
}

/// Memoizing façade over a single [`LocationProvider`].
///
/// Keeps one cache for countries, one keyed by country id for states and
/// one keyed by state id for cities. A lookup is served from the cache
/// unless nothing is stored yet or `force_refresh` is set; then the provider
/// is asked and the answer stored.
///
/// - Provider errors are returned unchanged and leave the cache as it was.
/// - Concurrent lookups of the same key share one provider call: the later
///   caller waits and gets the stored answer. Different keys do not block
///   each other.
/// - [`clear_cache`](Self::clear_cache) swaps all three caches at once.
pub struct LocationRepository<P> {
    provider: P,
    caches: Mutex<Caches>,
}

impl<P: LocationProvider> LocationRepository<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            caches: Mutex::new(Caches::default()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn countries(&self, force_refresh: bool) -> Result<Vec<Country>> {
        let slot = self.caches.lock().await.countries.clone();
        memoized(&slot, force_refresh, "countries", None, || {
            self.provider.fetch_countries()
        })
        .await
    }

    pub async fn states(&self, country_id: i64, force_refresh: bool) -> Result<Vec<State>> {
        let slot = self
            .caches
            .lock()
            .await
            .states
            .entry(country_id)
            .or_default()
            .clone();
        let mut prune = PruneEmptySlot::new(&self.caches, states_map, country_id, slot);
        let result = memoized(&prune.slot, force_refresh, "states", Some(country_id), || {
            self.provider.fetch_states(country_id)
        })
        .await;
        prune.armed = result.is_err();
        result
    }

    pub async fn cities(&self, state_id: i64, force_refresh: bool) -> Result<Vec<City>> {
        let slot = self
            .caches
            .lock()
            .await
            .cities
            .entry(state_id)
            .or_default()
            .clone();
        let mut prune = PruneEmptySlot::new(&self.caches, cities_map, state_id, slot);
        let result = memoized(&prune.slot, force_refresh, "cities", Some(state_id), || {
            self.provider.fetch_cities(state_id)
        })
        .await;
        prune.armed = result.is_err();
        result
    }

    /// Drops every cached list. Fetches still in flight finish into the
    /// discarded entries, so the next lookup of any key asks the provider.
    pub async fn clear_cache(&self) {
        *self.caches.lock().await = Caches::default();
        debug!("location caches cleared");
    }
}

fn states_map(caches: &mut Caches) -> &mut HashMap<i64, Slot<State>> {
    &mut caches.states
}

fn cities_map(caches: &mut Caches) -> &mut HashMap<i64, Slot<City>> {
    &mut caches.cities
}

/// Removes a keyed slot that is still empty once its lookup has failed or
/// been dropped, so failed ids do not accumulate entries.
///
/// Armed until the lookup succeeds. The slot is only removed while it is
/// still the one in the map, holds nothing, and nobody else holds a handle
/// to it (a waiter for the same key keeps it alive).
struct PruneEmptySlot<'a, T> {
    caches: &'a Mutex<Caches>,
    map: fn(&mut Caches) -> &mut HashMap<i64, Slot<T>>,
    key: i64,
    slot: Slot<T>,
    armed: bool,
}

impl<'a, T> PruneEmptySlot<'a, T> {
    fn new(
        caches: &'a Mutex<Caches>,
        map: fn(&mut Caches) -> &mut HashMap<i64, Slot<T>>,
        key: i64,
        slot: Slot<T>,
    ) -> Self {
        Self {
            caches,
            map,
            key,
            slot,
            armed: true,
        }
    }
}

impl<T> Drop for PruneEmptySlot<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Contended locks mean someone else is using the caches; leave it.
        let Ok(mut caches) = self.caches.try_lock() else {
            return;
        };
        let map = (self.map)(&mut *caches);
        let ours = map.get(&self.key).is_some_and(|s| Arc::ptr_eq(s, &self.slot));
        let unshared = Arc::strong_count(&self.slot) == 2;
        let empty = self.slot.try_lock().is_ok_and(|cached| cached.is_none());
        if ours && unshared && empty {
            map.remove(&self.key);
            debug!(key = self.key, "dropped empty cache slot");
        }
    }
}

async fn memoized<T, F, Fut>(
    slot: &Slot<T>,
    force_refresh: bool,
    kind: &'static str,
    key: Option<i64>,
    fetch: F,
) -> Result<Vec<T>>
where
    T: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut cached = slot.lock().await;
    if !force_refresh {
        if let Some(hit) = cached.as_ref() {
            debug!(kind, ?key, "cache hit");
            return Ok(hit.clone());
        }
    }

    debug!(kind, ?key, force_refresh, "fetching from provider");
    let fresh = fetch().await?;
    *cached = Some(fresh.clone());
    Ok(fresh)
}
