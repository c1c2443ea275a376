use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Category, RankingItem},
    routes::AppState,
};

/// Handler for the category listing
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.store.categories().await?;
    Ok(Json(categories))
}

/// Handler for one category's ranking items, best rank first
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<RankingItem>>> {
    state
        .store
        .category(category_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {} not found", category_id)))?;

    let items = state.store.items_for_category(category_id).await?;
    Ok(Json(items))
}
