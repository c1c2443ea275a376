use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{error::AppResult, routes::AppState, services::analyze};

const ANALYSIS_FALLBACK: &str = "分析できませんでした。";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// Handler for the taste-analysis endpoint
///
/// Formats the entire ranking snapshot per category and asks the text
/// generator to characterize the owner's taste.
pub async fn analyze(State(state): State<Arc<AppState>>) -> AppResult<Json<AnalyzeResponse>> {
    let categories = state.store.categories().await?;
    let items = state.store.all_items().await?;

    let overview = analyze::format_ranking_overview(&categories, &items);
    let prompt = analyze::analysis_prompt(&overview);

    let analysis = state.generator.generate(&prompt, 1024).await?;
    let analysis = if analysis.trim().is_empty() {
        ANALYSIS_FALLBACK.to_string()
    } else {
        analysis
    };

    tracing::info!(
        categories = categories.len(),
        items = items.len(),
        "Ranking analysis generated"
    );

    Ok(Json(AnalyzeResponse { analysis }))
}
