use axum::{extract::State, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::DigestPick,
    routes::AppState,
    services::{
        digest::{self, TRIVIA_FALLBACK},
        popularity,
    },
};

#[derive(Debug, Serialize)]
pub struct DigestResponse {
    pub success: bool,
    pub item: String,
    pub trivia: String,
    pub message: String,
}

fn trivia_prompt(pick: &DigestPick) -> String {
    format!(
        "「{}」（{}カテゴリの1位）について、面白い豆知識を1つだけ教えてください。50文字程度で、雑学として楽しめる内容にしてください。豆知識の内容だけを返してください。",
        pick.title, pick.category_name
    )
}

/// Handler for the daily digest push
///
/// Fetches both snapshots, builds the digest pool, draws one pick at random,
/// asks the text generator for a trivia annotation and pushes the composed
/// message. An empty pool is terminal: 422, no retry.
pub async fn send_digest(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<DigestResponse>> {
    let categories = state.store.categories().await?;
    let top_items = state.store.top_items().await?;

    let pool = popularity::digest_pool(&top_items, &categories)?;

    // thread_rng is not Send; draw before the first await point
    let picked = {
        let mut rng = rand::thread_rng();
        digest::pick_one(&pool, &mut rng)?.clone()
    };

    tracing::info!(
        request_id = %request_id,
        pool_size = pool.len(),
        picked = %picked.title,
        "Digest pick selected"
    );

    let trivia = state.generator.generate(&trivia_prompt(&picked), 256).await?;
    let trivia = if trivia.trim().is_empty() {
        TRIVIA_FALLBACK.to_string()
    } else {
        trivia
    };

    let message = digest::compose(&picked, &trivia);
    state.notifier.push(&state.digest_recipient, &message).await?;

    tracing::info!(request_id = %request_id, "Digest delivered");

    Ok(Json(DigestResponse {
        success: true,
        item: picked.title,
        trivia,
        message,
    }))
}
