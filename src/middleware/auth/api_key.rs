//! API key 検証 → ApiKey を extensions に入れる
//!
//! - `<header>: <scheme> <token>` (既定は `Authorization: ApiKey <token>`) を読む
//! - 成功時は `ApiKey` を request extensions に格納し、handler は
//!   `ApiKeyExtractor` で受け取る
//! - 失敗時は 401 (WWW-Authenticate 付き) を返す
//!
//! Key lookup against a store is the caller's concern; this layer only
//! checks that a well-formed credential was offered.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::ApiKeyPolicy;

/// Router 全体に API key の抽出を掛ける。
///
/// 例：
/// ```ignore
/// let config = Config::from_env()?;
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::api_key::apply(v1, config.api_key);
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, policy: ApiKeyPolicy) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // middleware 側の state は router の state とは独立に持たせる
    router.layer(middleware::from_fn_with_state(
        Arc::new(policy),
        api_key_middleware,
    ))
}

async fn api_key_middleware(
    State(policy): State<Arc<ApiKeyPolicy>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let key = match policy.extract(req.headers()) {
        Ok(key) => key,
        Err(err) => {
            tracing::warn!(
                error = %err,
                header = %policy.header,
                method = %req.method(),
                path = %req.uri().path(),
                "api key extraction failed"
            );
            return Err(AppError::from(err).with_scheme(policy.scheme.as_str()));
        }
    };

    tracing::debug!(key_fp = %key.fingerprint(), "api key accepted");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(key);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        http::{HeaderName, StatusCode, header},
        routing::get,
    };
    use tower::ServiceExt;

    use crate::api::extractors::ApiKeyExtractor;

    async fn echo_key(ApiKeyExtractor(key): ApiKeyExtractor) -> String {
        key.into_inner()
    }

    fn app(policy: ApiKeyPolicy) -> Router {
        apply(Router::new().route("/whoami", get(echo_key)), policy)
    }

    fn request(header: Option<(&str, &str)>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn valid_key_reaches_handler() {
        let res = app(ApiKeyPolicy::default())
            .oneshot(request(Some(("authorization", "ApiKey my-secret-key-123"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "my-secret-key-123");
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let res = app(ApiKeyPolicy::default())
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "ApiKey");
        assert!(body_string(res).await.contains("NO_AUTH_HEADER"));
    }

    #[tokio::test]
    async fn wrong_scheme_is_rejected() {
        let res = app(ApiKeyPolicy::default())
            .oneshot(request(Some(("authorization", "Bearer my-token"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(res).await.contains("MALFORMED_AUTH_HEADER"));
    }

    #[tokio::test]
    async fn scheme_without_token_is_rejected() {
        let res = app(ApiKeyPolicy::default())
            .oneshot(request(Some(("authorization", "ApiKey"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(res).await.contains("MALFORMED_AUTH_HEADER"));
    }

    #[tokio::test]
    async fn whitespace_only_token_is_rejected() {
        let res = app(ApiKeyPolicy::default())
            .oneshot(request(Some(("authorization", "ApiKey  "))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(res).await.contains("MALFORMED_AUTH_HEADER"));
    }

    #[tokio::test]
    async fn custom_policy_is_honoured() {
        let policy = ApiKeyPolicy::new(HeaderName::from_static("x-api-key"), "Token");

        let res = app(policy.clone())
            .oneshot(request(Some(("x-api-key", "Token abc"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "abc");

        let res = app(policy)
            .oneshot(request(Some(("authorization", "ApiKey abc"))))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Token");
    }
}
