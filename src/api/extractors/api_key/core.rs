use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{ApiKey, ApiKeyError};

/// Handler で ApiKey を受け取るための extractor
/// middleware が ApiKey を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
///
/// The extractor cannot see the router's `ApiKeyPolicy`, so this rejection
/// always advertises the default `ApiKey` scheme in `WWW-Authenticate`,
/// even when the middleware was configured with another one.
#[derive(Debug, Clone)]
pub struct ApiKeyExtractor(pub ApiKey);

impl<S> FromRequestParts<S> for ApiKeyExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ApiKey>()
            .cloned()
            .map(ApiKeyExtractor)
            .ok_or_else(|| AppError::from(ApiKeyError::NoAuthHeader))
    }
}
