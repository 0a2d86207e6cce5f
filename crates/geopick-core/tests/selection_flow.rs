use async_trait::async_trait;
use geopick_core::cancel::{cancellable, CancellationToken};
use geopick_core::provider::{ApiConfig, HttpResponse, HttpTransport, RemoteProvider};
use geopick_core::{
    GeoError, LocationRepository, LocationSelection, ManualEntry, Result, SelectionSession,
    SelectionStage,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const COUNTRIES: &str = r#"[
    {"id":1,"name":"United States"},
    {"id":2,"name":"Canada"}
]"#;
const US_STATES: &str = r#"[
    {"id":101,"name":"California","country_id":1},
    {"id":102,"name":"New York","country_id":1}
]"#;
const CA_STATES: &str = r#"[{"id":201,"name":"Ontario","country_id":2}]"#;
const CALIFORNIA_CITIES: &str = r#"[
    {"id":1001,"name":"San Francisco","state_id":101},
    {"id":1002,"name":"Los Angeles","state_id":101}
]"#;

/// A tiny in-process "API": USA (1) and Canada (2) with a few states and cities.
struct MiniApi {
    requests: Arc<AtomicUsize>,
    delay: Duration,
}

impl MiniApi {
    fn body_for(url: &Url) -> Option<&'static str> {
        let query = url.query().unwrap_or("");
        match (url.path(), query) {
            ("/v1/countries", _) => Some(COUNTRIES),
            ("/v1/states", "country_id=1") => Some(US_STATES),
            ("/v1/states", "country_id=2") => Some(CA_STATES),
            ("/v1/cities", "state_id=101") => Some(CALIFORNIA_CITIES),
            ("/v1/cities", _) => Some("[]"),
            _ => None,
        }
    }
}

#[async_trait]
impl HttpTransport for MiniApi {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(match Self::body_for(url) {
            Some(body) => HttpResponse {
                status: 200,
                body: body.as_bytes().to_vec(),
            },
            None => HttpResponse {
                status: 404,
                body: Vec::new(),
            },
        })
    }
}

fn session_with(delay: Duration) -> (SelectionSession<RemoteProvider>, Arc<AtomicUsize>) {
    let requests = Arc::new(AtomicUsize::new(0));
    let api = MiniApi {
        requests: requests.clone(),
        delay,
    };
    let provider =
        RemoteProvider::with_transport(ApiConfig::new("https://geo.example.com/v1"), api);
    let session = SelectionSession::new(Arc::new(LocationRepository::new(provider)));
    (session, requests)
}

#[tokio::test]
async fn usa_then_canada() {
    let (session, _) = session_with(Duration::ZERO);

    let countries = session.load_countries(false).await.unwrap();
    let usa = countries.iter().find(|c| c.id == 1).cloned();
    let canada = countries.iter().find(|c| c.id == 2).cloned();

    let states = session.select_country(usa, false).await.unwrap();
    assert_eq!(states.iter().map(|s| s.id).collect::<Vec<_>>(), [101, 102]);

    let cities = session.select_state(states.first().cloned(), false).await.unwrap();
    assert_eq!(cities.iter().map(|c| c.id).collect::<Vec<_>>(), [1001, 1002]);

    session.select_city(cities.first().cloned()).await;
    let response = session.response().await;
    assert_eq!(
        (response.country_id, response.state_id, response.city_id),
        (Some(1), Some(101), Some(1001))
    );
    assert_eq!(response.city_name, "San Francisco");
    assert!(response.is_complete());

    let states = session.select_country(canada, false).await.unwrap();
    assert_eq!(session.selected_state().await, None);
    assert_eq!(session.selected_city().await, None);
    assert_eq!(
        states.iter().map(|s| (s.id, s.name.as_str())).collect::<Vec<_>>(),
        [(201, "Ontario")]
    );
    assert_eq!(session.stage().await, SelectionStage::CountrySelected);
}

#[tokio::test]
async fn no_parent_selected_makes_no_request() {
    let (session, requests) = session_with(Duration::ZERO);
    assert!(session.select_state(None, false).await.unwrap().is_empty());
    assert!(session.select_country(None, true).await.unwrap().is_empty());
    assert_eq!(requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn response_serializes_in_camel_case() {
    let (session, _) = session_with(Duration::ZERO);
    let countries = session.load_countries(false).await.unwrap();
    session.select_country(countries.first().cloned(), false).await.unwrap();

    let json = serde_json::to_value(session.response().await).unwrap();
    assert_eq!(json["countryId"], 1);
    assert_eq!(json["countryName"], "United States");
    assert_eq!(json["stateId"], serde_json::Value::Null);
    assert_eq!(json["isCustomCity"], false);
}

#[tokio::test]
async fn manual_city_is_merged_over_the_pick() {
    let (session, _) = session_with(Duration::ZERO);
    let countries = session.load_countries(false).await.unwrap();
    let states = session.select_country(countries.first().cloned(), false).await.unwrap();
    session.select_state(states.first().cloned(), false).await.unwrap();

    let mut manual = ManualEntry::default();
    manual.set_city("  Sausalito ");
    let merged = LocationSelection::compose(&session.response().await, &manual);

    assert_eq!(merged.state_id, Some(101));
    assert!(!merged.is_custom_state);
    assert_eq!(merged.city_id, None);
    assert_eq!(merged.city_name, "Sausalito");
    assert!(merged.is_custom_city);
    assert!(merged.is_complete());
}

#[tokio::test(start_paused = true)]
async fn superseded_fetch_is_cancelled_and_not_cached() {
    let (session, requests) = session_with(Duration::from_secs(1));
    let repo = session.repository().clone();
    let token = CancellationToken::new();

    let pending = {
        let (repo, token) = (repo.clone(), token.clone());
        tokio::spawn(async move { cancellable(&token, repo.states(1, false)).await })
    };
    while requests.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    token.cancel();

    let err = pending.await.unwrap().unwrap_err();
    assert_eq!(err, GeoError::Cancelled);
    assert!(err.is_cancelled());

    // Nothing was cached, so the next lookup asks the API again.
    assert_eq!(repo.states(1, false).await.unwrap().len(), 2);
    assert_eq!(requests.load(Ordering::SeqCst), 2);
}
