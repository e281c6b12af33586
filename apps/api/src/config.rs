use anyhow::{Context, Result};

/// Default cap on the size of a submitted document (256 KiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 256 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_document_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_document_bytes: optional_env("MAX_DOCUMENT_BYTES")
                .map(|v| {
                    v.parse::<usize>()
                        .context("MAX_DOCUMENT_BYTES must be a positive integer")
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_DOCUMENT_BYTES),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
