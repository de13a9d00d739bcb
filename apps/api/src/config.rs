use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::BatchStrategy;
use crate::settings::SuffixMode;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding settings.toml, rules.txt and params.txt.
    pub data_dir: PathBuf,
    pub openai_base_url: String,
    pub suffix_mode: SuffixMode,
    pub batch_strategy: BatchStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            data_dir: PathBuf::from(env_or("DATA_DIR", "./data")),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            suffix_mode: parse_env("SUFFIX_MODE", "params")?,
            batch_strategy: parse_env("BATCH_STRATEGY", "batched")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    let raw = env_or(key, default);
    T::from_str(raw.trim())
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Environment variable '{key}' has an invalid value"))
}
