use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ProviderError, endpoint, fetch_json};

const PROVIDER: &str = "Geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Google Maps geocoding client.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Returns the best match for `address`, or `None` when the provider
    /// found nothing.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeocodeResult>, ProviderError> {
        let mut url = endpoint(PROVIDER, &self.base_url, "maps/api/geocode/json")?;
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);

        let response: GeocodeResponse = fetch_json(PROVIDER, self.client.get(url)).await?;

        debug!(
            "Geocoded '{}': {} result(s), status {:?}",
            address,
            response.results.len(),
            response.status
        );

        Ok(response.results.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_geocode_returns_first_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "seattle"))
            .and(query_param("key", "geo-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Seattle, WA, USA",
                        "geometry": {"location": {"lat": 47.6062095, "lng": -122.3320708}}
                    },
                    {
                        "formatted_address": "Seattle Hill, WA, USA",
                        "geometry": {"location": {"lat": 47.9, "lng": -122.1}}
                    }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(Client::new(), &mock_server.uri(), "geo-key");
        let result = client.geocode("seattle").await.unwrap().unwrap();

        assert_eq!(result.formatted_address, "Seattle, WA, USA");
        assert!((result.geometry.location.lat - 47.606_209_5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_geocode_zero_results() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(Client::new(), &mock_server.uri(), "geo-key");
        assert!(client.geocode("nowhere at all").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_geocode_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&mock_server)
            .await;

        let client = GeocodeClient::new(Client::new(), &mock_server.uri(), "geo-key");
        let err = client.geocode("seattle").await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Status { status, .. } if status.as_u16() == 503
        ));
    }
}
