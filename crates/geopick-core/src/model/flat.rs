// crates/geopick-core/src/model/flat.rs
use serde::{Deserialize, Serialize};

/// A country as served by every provider.
///
/// Entities are plain values: they are created by decoding a provider
/// response and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

/// A state / region. `country_id` always refers to a country returned by
/// the same provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
}

/// A city. `state_id` always refers to a state returned by the same
/// provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub state_id: i64,
}

impl Country {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl State {
    pub fn new(id: i64, name: impl Into<String>, country_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            country_id,
        }
    }
}

impl City {
    pub fn new(id: i64, name: impl Into<String>, state_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            state_id,
        }
    }
}
