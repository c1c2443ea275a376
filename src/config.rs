use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Supabase project REST URL (without the /rest/v1 suffix)
    pub supabase_url: String,

    /// Supabase anonymous API key
    pub supabase_anon_key: String,

    /// Anthropic API key for trivia and analysis generation
    pub anthropic_api_key: String,

    /// TMDb API key for movie metadata search
    pub tmdb_api_key: String,

    /// LINE Messaging API channel access token
    pub line_channel_access_token: String,

    /// LINE user ID that receives the daily digest push
    pub line_user_id: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
