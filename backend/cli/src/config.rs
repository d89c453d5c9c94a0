use serde::Deserialize;

/// billscan runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Base URL of a running instance, used by the client-side commands
    pub api_url: String,
    /// Gemini API key; validated when the server starts
    pub gemini_api_key: Option<String>,
    /// Gemini model used for bill extraction
    pub gemini_model: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            api_url: "http://localhost:8000".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BILLSCAN_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("BILLSCAN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            api_url: std::env::var("BILLSCAN_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
