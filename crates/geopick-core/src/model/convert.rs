// crates/geopick-core/src/model/convert.rs
use super::flat::{City, Country, State};
use super::nested::CountriesRaw;
use crate::common::DbStats;
use std::collections::HashMap;

/// The flattened form of a nested dataset, as served by
/// [`crate::provider::BundledProvider`].
#[derive(Clone, Debug, Default)]
pub struct LocationIndex {
    pub countries: Vec<Country>,
    pub states_by_country_id: HashMap<i64, Vec<State>>,
    pub cities_by_state_id: HashMap<i64, Vec<City>>,
}

impl LocationIndex {
    pub fn states_of(&self, country_id: i64) -> Vec<State> {
        self.states_by_country_id
            .get(&country_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn cities_of(&self, state_id: i64) -> Vec<City> {
        self.cities_by_state_id
            .get(&state_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            countries: self.countries.len(),
            states: self.states_by_country_id.values().map(Vec::len).sum(),
            cities: self.cities_by_state_id.values().map(Vec::len).sum(),
        }
    }
}

/// **Standard Converter:** Nested -> Flat.
///
/// Parent ids come from the nesting: a state gets the id of the country it
/// sits in, a city the id of its state. Source order is preserved.
pub fn flatten(raw_countries: CountriesRaw) -> LocationIndex {
    let mut index = LocationIndex {
        countries: Vec::with_capacity(raw_countries.len()),
        ..LocationIndex::default()
    };

    for c_raw in raw_countries {
        let mut states = Vec::new();

        for s_raw in c_raw.states.unwrap_or_default() {
            let cities: Vec<City> = s_raw
                .cities
                .unwrap_or_default()
                .into_iter()
                .map(|city_raw| City::new(city_raw.id, city_raw.name, s_raw.id))
                .collect();

            index.cities_by_state_id.insert(s_raw.id, cities);
            states.push(State::new(s_raw.id, s_raw.name, c_raw.id));
        }

        index.states_by_country_id.insert(c_raw.id, states);
        index.countries.push(Country::new(c_raw.id, c_raw.name));
    }
    index
}
