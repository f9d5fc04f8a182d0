use anyhow::{Context, Result};
use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SHORT_CODE_LENGTH: usize = 6;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Base used to build `shortUrl` values, without a trailing slash.
    pub base_url: String,
    /// Length of generated short codes.
    pub short_code_length: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let short_code_length = match env::var("SHORT_CODE_LENGTH") {
            Ok(value) => value
                .parse::<usize>()
                .context("SHORT_CODE_LENGTH must be a positive integer")?,
            Err(_) => DEFAULT_SHORT_CODE_LENGTH,
        };

        Ok(Self {
            port,
            base_url,
            short_code_length,
        })
    }
}
