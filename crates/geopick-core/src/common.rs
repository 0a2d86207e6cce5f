// crates/geopick-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a loaded dataset.
///
/// Returned by [`crate::provider::BundledProvider::stats`]; the counts
/// reflect the flattened in-memory index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}
