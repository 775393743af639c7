use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, endpoint, fetch_json};

const PROVIDER: &str = "TMDB";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub title: String,
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    pub release_date: Option<String>,
}

/// The Movie Database search client.
#[derive(Clone)]
pub struct MovieClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MovieClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Searches movies by free text; the location's search string is used as
    /// the query.
    pub async fn search(&self, query: &str) -> Result<Vec<TmdbMovie>, ProviderError> {
        let mut url = endpoint(PROVIDER, &self.base_url, "3/search/movie")?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", query);

        let response: SearchResponse = fetch_json(PROVIDER, self.client.get(url)).await?;

        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_movies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .and(query_param("query", "seattle"))
            .and(query_param("api_key", "tmdb-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "results": [
                    {
                        "title": "Sleepless in Seattle",
                        "overview": "A widower's son calls a radio show.",
                        "vote_average": 6.6,
                        "vote_count": 1800,
                        "poster_path": "/sleepless.jpg",
                        "popularity": 12.5,
                        "release_date": "1993-06-24"
                    },
                    {"title": "Untitled", "vote_average": 0, "vote_count": 0, "popularity": 0.1}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = MovieClient::new(Client::new(), &mock_server.uri(), "tmdb-key");
        let movies = client.search("seattle").await.unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].poster_path.as_deref(), Some("/sleepless.jpg"));
        assert!(movies[1].overview.is_none());
    }
}
