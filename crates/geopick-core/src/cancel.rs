// crates/geopick-core/src/cancel.rs

//! Cancellation as a distinct outcome.
//!
//! A fetch raced against a [`CancellationToken`] ends either with its own
//! result or, when the token fires first, with [`GeoError::Cancelled`]. The
//! losing future is dropped, so nothing it would have written (e.g. a
//! repository cache entry) is written.
//!
//! ```no_run
//! use geopick_core::cancel::{cancellable, CancellationToken};
//! use geopick_core::provider::BundledProvider;
//! use geopick_core::LocationRepository;
//!
//! # async fn run() {
//! let repo = LocationRepository::new(BundledProvider::default());
//! let token = CancellationToken::new();
//!
//! // A newer pick arrived: supersede the pending fetch.
//! token.cancel();
//! match cancellable(&token, repo.states(1, false)).await {
//!     Err(e) if e.is_cancelled() => {} // stay quiet
//!     Err(e) => eprintln!("{e}"),
//!     Ok(states) => println!("{} states", states.len()),
//! }
//! # }
//! ```

use crate::error::{GeoError, Result};
use std::future::Future;

pub use tokio_util::sync::CancellationToken;

/// Runs `fut` until it completes or `token` is cancelled.
///
/// An already-cancelled token wins without polling `fut`.
pub async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(GeoError::Cancelled),
        out = fut => out,
    }
}
