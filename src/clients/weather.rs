use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, endpoint, fetch_json};
use crate::domain::Coordinates;

const PROVIDER: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<ForecastDay>,
}

/// One entry of the daily forecast block.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    /// Unix timestamp (seconds) of the start of the day.
    pub time: i64,
    #[serde(default)]
    pub summary: String,
}

/// Dark Sky forecast client.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn daily_forecast(&self, at: Coordinates) -> Result<Vec<ForecastDay>, ProviderError> {
        let path = format!("forecast/{}/{}", self.api_key, at);
        let url = endpoint(PROVIDER, &self.base_url, &path)?;

        let response: ForecastResponse = fetch_json(PROVIDER, self.client.get(url)).await?;

        Ok(response.daily.map(|d| d.data).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_daily_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast/sky-key/47.6,-122.3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 47.6,
                "longitude": -122.3,
                "daily": {
                    "summary": "Rain all week.",
                    "data": [
                        {"time": 1_577_836_800, "summary": "Light rain."},
                        {"time": 1_577_923_200, "summary": "Overcast."}
                    ]
                }
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(Client::new(), &mock_server.uri(), "sky-key");
        let days = client
            .daily_forecast(Coordinates::new(47.6, -122.3))
            .await
            .unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].summary, "Light rain.");
        assert_eq!(days[1].time, 1_577_923_200);
    }

    #[tokio::test]
    async fn test_missing_daily_block_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 0.0,
                "longitude": 0.0
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(Client::new(), &mock_server.uri(), "sky-key");
        let days = client
            .daily_forecast(Coordinates::new(0.0, 0.0))
            .await
            .unwrap();

        assert!(days.is_empty());
    }
}
