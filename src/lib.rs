// src/lib.rs

//! # geopick-rs
//!
//! Workspace facade over [`geopick_core`]. Everything is re-exported as is;
//! [`prelude`] pulls in the handful of names a typical caller needs.

pub use geopick_core::*;

pub mod prelude {
    pub use geopick_core::cancel::{cancellable, CancellationToken};
    pub use geopick_core::provider::{
        ApiConfig, BundledProvider, FallbackProvider, RemoteProvider,
    };
    pub use geopick_core::{
        City, Country, GeoError, LocationProvider, LocationRepository, LocationSelection,
        ManualEntry, Result, SelectionSession, SelectionStage, State,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn prelude_drives_a_pick_on_the_shipped_dataset() {
        let repo = Arc::new(LocationRepository::new(BundledProvider::default()));
        let session = SelectionSession::new(repo);
        let countries = session.load_countries(false).await.unwrap();
        let states = session.select_country(countries.first().cloned(), false).await.unwrap();
        assert!(!states.is_empty());
        assert_eq!(session.stage().await, SelectionStage::CountrySelected);
    }
}
