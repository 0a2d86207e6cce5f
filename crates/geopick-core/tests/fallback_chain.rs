use async_trait::async_trait;
use geopick_core::provider::{
    ApiConfig, BundledProvider, FallbackProvider, HttpResponse, HttpTransport, RemoteProvider,
};
use geopick_core::{GeoError, LocationProvider, LocationRepository, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/countries+states+cities.json")
}

/// An API that is down: every request gets the same status.
struct Down {
    status: u16,
    hits: Arc<AtomicUsize>,
}

#[async_trait]
impl HttpTransport for Down {
    async fn get(&self, _url: &Url) -> Result<HttpResponse> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse {
            status: self.status,
            body: b"<html>maintenance</html>".to_vec(),
        })
    }
}

fn down_api(status: u16) -> (RemoteProvider, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let transport = Down {
        status,
        hits: hits.clone(),
    };
    (
        RemoteProvider::with_transport(ApiConfig::new("https://geo.example.com"), transport),
        hits,
    )
}

#[tokio::test]
async fn dataset_answers_when_api_is_down() {
    let (remote, hits) = down_api(503);
    let provider = FallbackProvider::new(remote, BundledProvider::from_path(fixture()));

    let countries = provider.fetch_countries().await.unwrap();
    assert!(countries.iter().any(|c| c.name == "Afghanistan"));
    let states = provider.fetch_states(1).await.unwrap();
    assert!(states.iter().any(|s| s.id == 3901));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn both_down_surfaces_the_dataset_error() {
    let (remote, _) = down_api(500);
    let dir = tempfile::tempdir().unwrap();
    let dataset = BundledProvider::from_path(dir.path().join("gone.json"));
    let provider = FallbackProvider::new(remote, dataset);

    assert_eq!(
        provider.fetch_cities(3901).await.unwrap_err(),
        GeoError::ResourceMissing("gone.json".into())
    );
}

#[tokio::test]
async fn invalid_base_url_also_falls_back() {
    let remote = RemoteProvider::with_transport(
        ApiConfig::new("not a url"),
        Down {
            status: 200,
            hits: Arc::new(AtomicUsize::new(0)),
        },
    );
    let provider = FallbackProvider::new(remote, BundledProvider::from_path(fixture()));
    assert_eq!(provider.fetch_cities(866).await.unwrap().len(), 2);
}

#[tokio::test]
async fn repository_caches_fallback_answers() {
    let (remote, hits) = down_api(502);
    let dataset = BundledProvider::from_path(fixture());
    let repo = LocationRepository::new(FallbackProvider::new(remote, dataset));

    let first = repo.states(233, false).await.unwrap();
    let second = repo.states(233, false).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    repo.states(233, true).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
