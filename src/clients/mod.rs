//! HTTP clients for the third-party data providers.
//!
//! Every client shares one pooled `reqwest::Client` and takes its base URL
//! from configuration so tests can point it at a local mock server.

pub mod geocode;
pub mod meetup;
pub mod movies;
pub mod weather;
pub mod yelp;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ProvidersConfig;
use geocode::GeocodeClient;
use meetup::MeetupClient;
use movies::MovieClient;
use weather::WeatherClient;
use yelp::YelpClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{provider} url is invalid: {source}")]
    Url {
        provider: &'static str,
        #[source]
        source: url::ParseError,
    },
}

impl ProviderError {
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Request { provider, .. }
            | Self::Status { provider, .. }
            | Self::Url { provider, .. } => provider,
        }
    }
}

/// Builds the one HTTP client every provider shares.
pub fn build_shared_http_client(config: &ProvidersConfig) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Joins `path` onto a configured base URL, tolerating a trailing slash.
pub(crate) fn endpoint(provider: &'static str, base_url: &str, path: &str) -> Result<Url, ProviderError> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|source| ProviderError::Url { provider, source })
}

/// Request URLs carry API keys, so they are dropped from the error.
fn request_error(provider: &'static str, source: reqwest::Error) -> ProviderError {
    ProviderError::Request {
        provider,
        source: source.without_url(),
    }
}

/// Sends `request` and decodes a JSON body, turning non-2xx answers into
/// [`ProviderError::Status`].
pub(crate) async fn fetch_json<T>(provider: &'static str, request: RequestBuilder) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|source| request_error(provider, source))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            provider,
            status,
            body,
        });
    }

    debug!("{} responded with {}", provider, response.status());

    response
        .json()
        .await
        .map_err(|source| request_error(provider, source))
}

/// All provider clients, built once at startup and shared by the services.
#[derive(Clone)]
pub struct Providers {
    pub geocode: GeocodeClient,
    pub weather: WeatherClient,
    pub meetup: MeetupClient,
    pub movies: MovieClient,
    pub yelp: YelpClient,
}

impl Providers {
    #[must_use]
    pub fn new(http: &Client, config: &ProvidersConfig) -> Self {
        Self {
            geocode: GeocodeClient::new(
                http.clone(),
                &config.geocode_base_url,
                &config.geocode_api_key,
            ),
            weather: WeatherClient::new(
                http.clone(),
                &config.weather_base_url,
                &config.weather_api_key,
            ),
            meetup: MeetupClient::new(
                http.clone(),
                &config.meetup_base_url,
                &config.meetup_api_key,
            ),
            movies: MovieClient::new(http.clone(), &config.movie_base_url, &config.movie_api_key),
            yelp: YelpClient::new(http.clone(), &config.yelp_base_url, &config.yelp_api_key),
        }
    }

    pub fn from_config(config: &ProvidersConfig) -> anyhow::Result<Self> {
        let http = build_shared_http_client(config)?;
        Ok(Self::new(&http, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let url = endpoint("Test", "http://localhost:9000/", "/v3/search").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v3/search");
    }

    #[tokio::test]
    async fn request_errors_do_not_expose_api_keys() {
        let client = GeocodeClient::new(Client::new(), "http://127.0.0.1:9", "SECRET-GEO-KEY");

        let err = client.geocode("seattle").await.unwrap_err();

        assert!(matches!(err, ProviderError::Request { .. }));
        let message = err.to_string();
        assert!(!message.contains("SECRET-GEO-KEY"), "{message}");
        assert!(!message.contains("127.0.0.1:9"), "{message}");
    }

    #[tokio::test]
    async fn decode_errors_do_not_expose_api_keys() {
        use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = MovieClient::new(Client::new(), &mock_server.uri(), "SECRET-TMDB-KEY");
        let err = client.search("seattle").await.unwrap_err();

        assert!(!err.to_string().contains("SECRET-TMDB-KEY"));
    }

    #[test]
    fn endpoint_rejects_garbage_base() {
        let err = endpoint("Test", "not a url", "path").unwrap_err();
        assert_eq!(err.provider(), "Test");
    }
}
