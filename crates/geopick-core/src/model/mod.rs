// crates/geopick-core/src/model/mod.rs
pub mod convert;
pub mod flat;
pub mod nested;
pub mod selection;

pub use convert::{flatten, LocationIndex};
pub use flat::{City, Country, State};
pub use nested::{CityRaw, CountriesRaw, CountryRaw, StateRaw};
pub use selection::{LocationSelection, ManualEntry};

/// Resource name of the bundled dataset, without directory.
pub const DATASET_FILENAME: &str = "countries+states+cities.json";
