use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{FavoriteSearchHit, MovieSummary},
    routes::AppState,
    services::popularity,
};

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieSearchResponse {
    pub results: Vec<MovieSummary>,
}

/// Handler for TMDb movie search
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieQuery>,
) -> AppResult<Json<MovieSearchResponse>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing query parameter \"q\"".to_string()))?;

    let results = state.movies.search_movies(&query).await?;
    Ok(Json(MovieSearchResponse { results }))
}

#[derive(Debug, Deserialize)]
pub struct FavoriteQuery {
    #[serde(default)]
    q: String,
    slot: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteSearchResponse {
    pub results: Vec<FavoriteSearchHit>,
    pub query: String,
}

/// Handler for searching public users' favorites by title
///
/// The store prefilters by free text and slot; the privacy gate and the
/// join to owner display fields happen in-process. An empty match set is an
/// empty result, not an error.
pub async fn search_favorites(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FavoriteQuery>,
) -> AppResult<Json<FavoriteSearchResponse>> {
    let favorites = state.store.search_favorites(&params.q, params.slot).await?;
    let profiles = state.store.public_profiles().await?;

    let results = popularity::search_hits(&favorites, &profiles, params.slot);

    tracing::info!(
        query = %params.q,
        slot = ?params.slot,
        matched = results.len(),
        "Favorite search completed"
    );

    Ok(Json(FavoriteSearchResponse {
        results,
        query: params.q,
    }))
}
