// crates/geopick-core/src/provider/remote.rs
use crate::cancel::{cancellable, CancellationToken};
use crate::error::{GeoError, Result};
use crate::model::{City, Country, State};
use crate::traits::LocationProvider;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Endpoint layout of a remote location API.
///
/// Requests are `GET {base_url}{path}?{key}={id}`; any query string already
/// present on `base_url` is kept and the id parameter appended after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub countries_path: String,
    pub states_path: String,
    pub cities_path: String,
    pub country_query_key: String,
    pub state_query_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            countries_path: "/countries".into(),
            states_path: "/states".into(),
            cities_path: "/cities".into(),
            country_query_key: "country_id".into(),
            state_query_key: "state_id".into(),
        }
    }

    pub fn with_countries_path(mut self, path: impl Into<String>) -> Self {
        self.countries_path = path.into();
        self
    }

    pub fn with_states_path(mut self, path: impl Into<String>) -> Self {
        self.states_path = path.into();
        self
    }

    pub fn with_cities_path(mut self, path: impl Into<String>) -> Self {
        self.cities_path = path.into();
        self
    }

    pub fn with_country_query_key(mut self, key: impl Into<String>) -> Self {
        self.country_query_key = key.into();
        self
    }

    pub fn with_state_query_key(mut self, key: impl Into<String>) -> Self {
        self.state_query_key = key.into();
        self
    }

    /// Builds the request URL for `path` with extra query pairs.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|_| GeoError::InvalidBaseUrl)?;
        if url.cannot_be_a_base() {
            return Err(GeoError::InvalidBaseUrl);
        }

        let base_path = url.path().trim_end_matches('/').to_string();
        if path.starts_with('/') {
            url.set_path(&format!("{base_path}{path}"));
        } else {
            url.set_path(&format!("{base_path}/{path}"));
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The minimal HTTP capability the remote provider needs.
///
/// Implementations return [`GeoError::InvalidResponse`] when no HTTP
/// response was obtained. Status codes are not interpreted here.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// [`HttpTransport`] over a shared `reqwest::Client`.
#[cfg(feature = "remote")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "remote")]
impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with a whole-request timeout. A timed out request is
    /// reported as [`GeoError::InvalidResponse`].
    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                debug!(error = %e, "failed to build HTTP client");
                GeoError::InvalidResponse
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "remote")]
#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                debug!(%url, error = %e, "request failed without a response");
                GeoError::InvalidResponse
            })?;

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            // The status decides the outcome; the body is irrelevant.
            Err(_) if !is_success(status) => Vec::new(),
            Err(e) => {
                debug!(%url, error = %e, "failed to read response body");
                return Err(GeoError::InvalidResponse);
            }
        };
        Ok(HttpResponse { status, body })
    }
}

fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Provider backed by a remote JSON API.
///
/// Each endpoint answers with a JSON array of the entity, e.g.
/// `[{"id":101,"name":"California","country_id":1}]` for states.
#[derive(Clone)]
pub struct RemoteProvider {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
    cancel: Option<CancellationToken>,
}

impl RemoteProvider {
    /// Remote provider using [`ReqwestTransport`].
    #[cfg(feature = "remote")]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    pub fn with_transport(config: ApiConfig, transport: impl HttpTransport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            cancel: None,
        }
    }

    /// Every request issued after `token` fires ends with
    /// [`GeoError::Cancelled`], including the ones in flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.config.endpoint(path, query)?;
        debug!(%url, "GET");

        let request = self.transport.get(&url);
        let response = match &self.cancel {
            Some(token) => cancellable(token, request).await?,
            None => request.await?,
        };

        if !is_success(response.status) {
            return Err(GeoError::HttpStatus(response.status));
        }
        serde_json::from_slice(&response.body).map_err(|e| {
            debug!(%url, error = %e, "undecodable body");
            GeoError::DecodingFailed
        })
    }
}

#[async_trait]
impl LocationProvider for RemoteProvider {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        self.fetch(&self.config.countries_path, &[]).await
    }

    async fn fetch_states(&self, country_id: i64) -> Result<Vec<State>> {
        let query = [(self.config.country_query_key.as_str(), country_id.to_string())];
        self.fetch(&self.config.states_path, &query).await
    }

    async fn fetch_cities(&self, state_id: i64) -> Result<Vec<City>> {
        let query = [(self.config.state_query_key.as_str(), state_id.to_string())];
        self.fetch(&self.config.cities_path, &query).await
    }
}
