// crates/geopick-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (locating, reading, decompressing) of the
//! bundled dataset. Parsing and flattening live in [`crate::model`]; the
//! exactly-once caching lives in [`crate::provider::BundledProvider`].

use crate::error::Result;
use crate::model::DATASET_FILENAME;
use async_trait::async_trait;
use std::path::PathBuf;

mod common_io;

pub use common_io::{FileSource, StaticSource};

/// A read-only byte source for one dataset document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Resource name used in [`crate::GeoError::ResourceMissing`].
    fn name(&self) -> &str;

    /// Reads the whole (decompressed) document.
    async fn read(&self) -> Result<Vec<u8>>;
}

/// Directory the crate ships its dataset in.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn default_dataset_filename() -> &'static str {
    DATASET_FILENAME
}

/// Full path of the default dataset.
pub fn default_dataset_path() -> PathBuf {
    default_data_dir().join(default_dataset_filename())
}
