use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub token_file: PathBuf,
    /// Unset means the HTTP client's default (no timeout).
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http://localhost:5000".into()),
            token_file: env::var("TOKEN_FILE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| ".planner/credentials.json".into())
                .into(),
            request_timeout: match env::var("REQUEST_TIMEOUT_SECONDS") {
                Ok(v) if !v.is_empty() => Some(Duration::from_secs(v.parse().map_err(|e| {
                    anyhow::anyhow!("Invalid REQUEST_TIMEOUT_SECONDS '{}': {}", v, e)
                })?)),
                _ => None,
            },
        })
    }
}
