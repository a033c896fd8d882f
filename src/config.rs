use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub data_dir: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_api_per_min: u32,

    // Insight upstream; without a key the panel serves the static fallback
    pub insight_api_base: String,
    pub insight_api_key: Option<String>,
    pub insight_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            insight_api_base: env::var("INSIGHT_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            insight_api_key: env::var("INSIGHT_API_KEY").ok(),
            insight_model: env::var("INSIGHT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}
