/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - ApiKeyError を 401 に統一的に変換
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::{ApiKeyError, api_key::DEFAULT_SCHEME};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    Unauthorized {
        code: &'static str,
        message: String,
        // Sent back as WWW-Authenticate.
        scheme: String,
    },
}

impl AppError {
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }

    /// Replace the scheme advertised in WWW-Authenticate.
    pub fn with_scheme(self, scheme: impl Into<String>) -> Self {
        match self {
            AppError::Unauthorized { code, message, .. } => AppError::Unauthorized {
                code,
                message,
                scheme: scheme.into(),
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized { code, .. } => *code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, scheme) = match self {
            AppError::Unauthorized {
                code,
                message,
                scheme,
            } => (StatusCode::UNAUTHORIZED, code, message, scheme),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        let mut response = (status, Json(body)).into_response();

        if let Ok(value) = HeaderValue::from_str(&scheme) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, value);
        }

        response
    }
}

impl From<ApiKeyError> for AppError {
    fn from(e: ApiKeyError) -> Self {
        match e {
            ApiKeyError::NoAuthHeader => AppError::unauthorized("NO_AUTH_HEADER", e.to_string()),
            ApiKeyError::MalformedHeader => {
                AppError::unauthorized("MALFORMED_AUTH_HEADER", e.to_string())
            }
        }
    }
}
