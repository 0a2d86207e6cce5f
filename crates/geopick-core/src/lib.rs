// crates/geopick-core/src/lib.rs

//! # geopick-core
//!
//! Country → state → city lookup and cascading selection.
//!
//! Data comes from a [`LocationProvider`]: a remote JSON API, a bundled
//! dataset document, or one backed up by the other (see [`provider`]).
//! A [`LocationRepository`] memoizes provider answers per parent id and a
//! [`SelectionSession`] drives the pick, clearing lower levels whenever a
//! higher one changes. The end result is a [`LocationSelection`], optionally
//! merged with free-text entries from a [`ManualEntry`].

pub mod cancel;
pub mod common;
pub mod error;
pub mod loader;
pub mod model;
pub mod provider;
pub mod repository;
pub mod session;
pub mod text;
pub mod traits;

pub use crate::common::DbStats;
pub use crate::error::{GeoError, Result};
pub use crate::model::{City, Country, LocationIndex, LocationSelection, ManualEntry, State};
pub use crate::repository::LocationRepository;
pub use crate::session::{SelectionSession, SelectionStage};
pub use crate::traits::{LocationProvider, NameMatch};
