use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, endpoint, fetch_json};
use crate::domain::Coordinates;

const PROVIDER: &str = "Meetup";
const PAGE_SIZE: &str = "20";

#[derive(Debug, Deserialize)]
struct UpcomingEventsResponse {
    #[serde(default)]
    events: Vec<MeetupEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeetupEvent {
    #[serde(default)]
    pub link: String,
    pub group: MeetupGroup,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeetupGroup {
    #[serde(default)]
    pub name: String,
    /// Unix timestamp in milliseconds.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub who: String,
}

#[derive(Clone)]
pub struct MeetupClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MeetupClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn upcoming_events(&self, near: Coordinates) -> Result<Vec<MeetupEvent>, ProviderError> {
        let mut url = endpoint(PROVIDER, &self.base_url, "find/upcoming_events")?;
        url.query_pairs_mut()
            .append_pair("sign", "true")
            .append_pair("photo-host", "public")
            .append_pair("lon", &near.longitude.to_string())
            .append_pair("page", PAGE_SIZE)
            .append_pair("lat", &near.latitude.to_string())
            .append_pair("key", &self.api_key);

        let response: UpcomingEventsResponse = fetch_json(PROVIDER, self.client.get(url)).await?;

        Ok(response.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_upcoming_events() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/find/upcoming_events"))
            .and(query_param("lat", "47.6"))
            .and(query_param("lon", "-122.3"))
            .and(query_param("page", "20"))
            .and(query_param("key", "meetup-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": {"city": "Seattle"},
                "events": [{
                    "link": "https://www.meetup.com/rustaceans/events/1/",
                    "group": {
                        "name": "Seattle Rustaceans",
                        "created": 1_420_070_400_000_i64,
                        "who": "Crabs"
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = MeetupClient::new(Client::new(), &mock_server.uri(), "meetup-key");
        let events = client
            .upcoming_events(Coordinates::new(47.6, -122.3))
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].group.name, "Seattle Rustaceans");
        assert_eq!(events[0].group.who, "Crabs");
    }

    #[tokio::test]
    async fn test_event_without_group_creation_still_decodes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/find/upcoming_events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [
                    {"link": "https://www.meetup.com/a/events/1/", "group": {"name": "A", "who": "Folks"}},
                    {"link": "https://www.meetup.com/b/events/2/", "group": {"name": "B", "created": 1, "who": "Members"}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = MeetupClient::new(Client::new(), &mock_server.uri(), "meetup-key");
        let events = client
            .upcoming_events(Coordinates::new(47.6, -122.3))
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(events[0].group.created.is_none());
        assert_eq!(events[1].group.created, Some(1));
    }
}
