/*
 * Responsibility
 * - 環境変数から API key の読み取り方針を読み込む (API_KEY_HEADER, API_KEY_SCHEME)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;

use axum::http::HeaderName;

use crate::services::auth::{ApiKeyPolicy, api_key::DEFAULT_SCHEME};

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKeyPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same rules as `from_env`, reading values through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let header = match lookup("API_KEY_HEADER") {
            Some(v) => HeaderName::from_bytes(v.trim().as_bytes())
                .map_err(|_| ConfigError::Invalid("API_KEY_HEADER"))?,
            None => ApiKeyPolicy::default().header,
        };

        let scheme = lookup("API_KEY_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme.is_empty() || scheme.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid("API_KEY_SCHEME"));
        }

        Ok(Self {
            api_key: ApiKeyPolicy::new(header, scheme),
        })
    }
}
