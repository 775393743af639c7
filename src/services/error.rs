use crate::clients::ProviderError;
use thiserror::Error;

/// Errors from resolving a location or looking up its resources.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{provider} found no results for '{query}'")]
    NoResults {
        provider: &'static str,
        query: String,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LookupError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }
}
