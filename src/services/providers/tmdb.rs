use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, TmdbMovie},
    services::providers::MovieSearcher,
};

const API_URL: &str = "https://api.themoviedb.org/3";

/// Movie metadata lookup via TMDb
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl MovieSearcher for TmdbClient {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let url = format!("{}/search/movie", API_URL);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", "ja-JP"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDb API error: {} {}",
                status, body
            )));
        }

        let search: SearchResponse = response.json().await?;
        let movies: Vec<MovieSummary> = search.results.into_iter().map(MovieSummary::from).collect();

        tracing::info!(query = %query, results = movies.len(), "Movie search completed");

        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "results": [{
                "id": 438631,
                "title": "DUNE/デューン 砂の惑星",
                "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                "release_date": "2021-09-15",
                "vote_average": 7.8,
                "overview": "砂漠の惑星アラキス。"
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 438631);
    }

    #[test]
    fn test_search_response_missing_results_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
