use thiserror::Error;

use crate::models::todo::Todo;

pub mod http;
pub mod schema;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status code {0}")]
    HttpStatus(u16),

    #[error("Failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// Source of seed data for first-run population of the local store.
pub trait RemoteTodoSource {
    fn fetch_todos(&self) -> Result<Vec<Todo>, NetworkError>;
}
