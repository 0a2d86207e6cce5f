// crates/geopick-core/src/model/nested.rs
//! # The Nested Dataset
//!
//! Shape of the bundled `countries+states+cities.json` document. Parent ids
//! are not repeated inside the nested arrays; they are implied by nesting and
//! filled in when the tree is flattened (see [`super::convert::flatten`]).
//!
//! **Structure:** `Vec<CountryRaw>` -> `Vec<StateRaw>` -> `Vec<CityRaw>`
//!
//! Every other field of the upstream dataset (iso codes, coordinates,
//! translations, ...) is ignored.

use serde::Deserialize;

/// Raw city structure as it comes from JSON.
#[derive(Debug, Deserialize)]
pub struct CityRaw {
    pub id: i64,
    pub name: String,
}

/// Raw state / region structure from JSON.
#[derive(Debug, Deserialize)]
pub struct StateRaw {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cities: Option<Vec<CityRaw>>,
}

/// Raw country structure from JSON.
#[derive(Debug, Deserialize)]
pub struct CountryRaw {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub states: Option<Vec<StateRaw>>,
}

pub type CountriesRaw = Vec<CountryRaw>;
