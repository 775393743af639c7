use serde::{Deserialize, Serialize};

use crate::clients::movies::TmdbMovie;

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Optional fields are left out of the JSON when the provider did not send
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub average_votes: f64,
    pub total_votes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub popularity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_on: Option<String>,
}

impl From<&TmdbMovie> for Movie {
    fn from(movie: &TmdbMovie) -> Self {
        Self {
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            average_votes: movie.vote_average,
            total_votes: movie.vote_count,
            image_url: movie
                .poster_path
                .as_deref()
                .map(|path| format!("{POSTER_BASE_URL}{path}")),
            popularity: movie.popularity,
            released_on: movie.release_date.clone(),
        }
    }
}
