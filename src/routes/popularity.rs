use axum::{extract::State, Json};
use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::PopularityEntry,
    routes::AppState,
    services::popularity::{self, POPULARITY_LIMIT},
};

/// Handler for the cross-user popularity ranking
///
/// Recomputed per request from the current favorites snapshot; only
/// favorites owned by public profiles count.
pub async fn popularity(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<PopularityEntry>>> {
    let favorites = state.store.favorites().await?;
    let profiles = state.store.public_profiles().await?;

    let public_ids: HashSet<String> = profiles.into_iter().map(|p| p.id).collect();

    // Malformed records are skipped inside the aggregation; surface the count here
    let malformed = favorites.iter().filter(|f| f.title.is_none()).count();
    if malformed > 0 {
        tracing::warn!(skipped = malformed, "Favorites without a title skipped");
    }

    let ranked = popularity::rank_popular(&favorites, &public_ids, POPULARITY_LIMIT);

    tracing::info!(
        favorites = favorites.len(),
        public_users = public_ids.len(),
        groups = ranked.len(),
        "Popularity ranking computed"
    );

    Ok(Json(ranked))
}
