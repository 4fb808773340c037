use reqwest::Url;
use reqwest::blocking::Client;

use crate::{
    models::todo::Todo,
    remote::{NetworkError, RemoteTodoSource, schema::TodosScheme},
};

pub const DEFAULT_SEED_URL: &str = "https://dummyjson.com/todos";

pub struct HttpTodoSource {
    url: String,
    client: Client,
}

impl HttpTodoSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

impl Default for HttpTodoSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_URL)
    }
}

impl RemoteTodoSource for HttpTodoSource {
    fn fetch_todos(&self) -> Result<Vec<Todo>, NetworkError> {
        let url =
            Url::parse(&self.url).map_err(|_| NetworkError::InvalidUrl(self.url.clone()))?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| NetworkError::Transport {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpStatus(status.as_u16()));
        }

        let body = response.text().map_err(|e| NetworkError::Transport {
            url: self.url.clone(),
            source: e,
        })?;

        let scheme: TodosScheme =
            serde_json::from_str(&body).map_err(|e| NetworkError::Decode { source: e })?;

        Ok(scheme.todos.into_iter().map(|t| t.map_to_domain()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_url_before_sending() {
        let source = HttpTodoSource::new("not a url");
        match source.fetch_todos() {
            Err(NetworkError::InvalidUrl(url)) => assert_eq!(url, "not a url"),
            _ => panic!("Expected InvalidUrl error"),
        }
    }
}
