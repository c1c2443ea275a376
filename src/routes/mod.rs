use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::services::providers::{MovieSearcher, Notifier, RecordStore, TextGenerator};

pub mod analyze;
pub mod card;
pub mod digest;
pub mod popularity;
pub mod rankings;
pub mod search;

/// Shared application state: the external collaborators behind trait objects
/// plus the digest recipient. The core itself is stateless.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub notifier: Arc<dyn Notifier>,
    pub movies: Arc<dyn MovieSearcher>,
    /// Opaque recipient identifier handed to the notifier
    pub digest_recipient: String,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // The original worker answered every response with permissive CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
        .route("/rankings", get(rankings::list_categories))
        .route("/rankings/:category_id", get(rankings::list_items))
        .route("/analyze", get(analyze::analyze))
        .route("/search/movie", get(search::search_movies))
        .route("/search/favorites", get(search::search_favorites))
        .route("/popularity", get(popularity::popularity))
        .route("/card/:category_id", get(card::card))
        .route("/digest", post(digest::send_digest))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// API banner, kept for clients probing the root path
async fn banner() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "message": "MY RANKING API v2.0" })))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
