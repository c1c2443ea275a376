use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
    services::card,
};

/// Handler for the SVG share card of one category's top three
pub async fn card(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let category = state
        .store
        .category(category_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {} not found", category_id)))?;

    let items = state.store.items_for_category(category_id).await?;
    let svg = card::render_card(&category.name, &category.icon, &items);

    tracing::info!(
        category_id = category_id,
        items = items.len(),
        "Share card rendered"
    );

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
