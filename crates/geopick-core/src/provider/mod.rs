// crates/geopick-core/src/provider/mod.rs

//! # Providers
//!
//! Concrete [`LocationProvider`] implementations:
//!
//! - [`RemoteProvider`]: JSON over HTTP, endpoint layout from [`ApiConfig`].
//! - [`BundledProvider`]: a nested dataset document, loaded once.
//! - [`FallbackProvider`]: one provider backed up by another.
//!
//! The free functions below build the common combinations.

mod bundled;
mod fallback;
mod remote;

pub use bundled::BundledProvider;
pub use fallback::FallbackProvider;
#[cfg(feature = "remote")]
pub use remote::ReqwestTransport;
pub use remote::{ApiConfig, HttpResponse, HttpTransport, RemoteProvider};

use crate::traits::LocationProvider;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;

// Single in-process copy of the shipped dataset so it is parsed once per process.
static SHARED_BUNDLED: Lazy<Arc<BundledProvider>> =
    Lazy::new(|| Arc::new(BundledProvider::default()));

/// The provider over the dataset shipped with the crate, shared by every
/// caller in the process.
pub fn shared_bundled() -> Arc<BundledProvider> {
    Arc::clone(&SHARED_BUNDLED)
}

/// Remote API with the default endpoint layout.
#[cfg(feature = "remote")]
pub fn remote(base_url: impl Into<String>) -> Box<dyn LocationProvider> {
    Box::new(RemoteProvider::new(ApiConfig::new(base_url)))
}

/// Dataset document at `path`.
pub fn bundled(path: impl Into<PathBuf>) -> Box<dyn LocationProvider> {
    Box::new(BundledProvider::from_path(path))
}

/// Remote API first, the dataset at `path` when the API fails.
#[cfg(feature = "remote")]
pub fn remote_with_bundled_fallback(
    base_url: impl Into<String>,
    path: impl Into<PathBuf>,
) -> Box<dyn LocationProvider> {
    Box::new(FallbackProvider::new(
        RemoteProvider::new(ApiConfig::new(base_url)),
        BundledProvider::from_path(path),
    ))
}
