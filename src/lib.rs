//! Extraction of `Authorization: ApiKey <token>` credentials for axum
//! services.
//!
//! ```ignore
//! let config = apikey_auth::config::Config::from_env()?;
//! let app = apikey_auth::middleware::auth::api_key::apply(routes(), config.api_key);
//! ```
//!
//! Handlers receive the key through `api::extractors::ApiKeyExtractor`.
//! `services::auth::get_api_key` is the framework-free parser underneath.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use error::AppError;
pub use services::auth::{ApiKey, ApiKeyError, ApiKeyPolicy, get_api_key};
