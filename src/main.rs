use std::sync::Arc;

use ranking_api::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::{
        anthropic::AnthropicClient, line::LineNotifier, supabase::SupabaseStore, tmdb::TmdbClient,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ranking_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = Arc::new(AppState {
        store: Arc::new(SupabaseStore::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
        )),
        generator: Arc::new(AnthropicClient::new(config.anthropic_api_key.clone())),
        notifier: Arc::new(LineNotifier::new(config.line_channel_access_token.clone())),
        movies: Arc::new(TmdbClient::new(config.tmdb_api_key.clone())),
        digest_recipient: config.line_user_id.clone(),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "ranking-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
