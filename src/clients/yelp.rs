use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, endpoint, fetch_json};
use crate::domain::Coordinates;

const PROVIDER: &str = "Yelp";

#[derive(Debug, Deserialize)]
struct BusinessSearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YelpBusiness {
    #[serde(default)]
    pub name: String,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

/// Yelp Fusion business search client. Authenticates with a bearer token.
#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YelpClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn search_businesses(&self, near: Coordinates) -> Result<Vec<YelpBusiness>, ProviderError> {
        let mut url = endpoint(PROVIDER, &self.base_url, "v3/businesses/search")?;
        url.query_pairs_mut()
            .append_pair("latitude", &near.latitude.to_string())
            .append_pair("longitude", &near.longitude.to_string());

        let request = self.client.get(url).bearer_auth(&self.api_key);
        let response: BusinessSearchResponse = fetch_json(PROVIDER, request).await?;

        Ok(response.businesses)
    }
}
