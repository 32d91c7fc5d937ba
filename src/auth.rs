//! HTTP Basic Authentication for operator routes

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Username for operator routes (None = auth disabled)
    pub username: Option<String>,
    /// Password for operator routes
    pub password: Option<String>,
}

impl AuthConfig {
    /// Load auth config from environment variables
    /// HOST_USERNAME and HOST_PASSWORD must both be set to enable auth
    pub fn from_env() -> Self {
        let username = std::env::var("HOST_USERNAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let password = std::env::var("HOST_PASSWORD")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if username.is_some() && password.is_some() {
            tracing::info!("Host authentication enabled");
            Self { username, password }
        } else {
            if username.is_some() || password.is_some() {
                tracing::warn!(
                    "HOST_USERNAME and HOST_PASSWORD must both be set to enable authentication"
                );
            }
            tracing::warn!("Host authentication DISABLED - anyone can control the quiz!");
            Self {
                username: None,
                password: None,
            }
        }
    }

    /// Check if authentication is enabled
    pub fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Validate credentials
    pub fn validate(&self, username: &str, password: &str) -> bool {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => {
                // Evaluate both so timing does not reveal which one was wrong
                let user_ok = constant_time_eq(u.as_bytes(), username.as_bytes());
                let pass_ok = constant_time_eq(p.as_bytes(), password.as_bytes());
                user_ok & pass_ok
            }
            _ => true, // Auth disabled, allow all
        }
    }
}

/// Constant-time byte comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Extract `(username, password)` from a `Basic` Authorization header
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware for HTTP Basic Authentication on operator routes
pub async fn host_auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !auth_config.is_enabled() {
        return next.run(request).await;
    }

    if let Some((username, password)) = basic_credentials(request.headers()) {
        if auth_config.validate(&username, &password) {
            return next.run(request).await;
        }
    }

    tracing::warn!("Rejected unauthenticated request to {}", request.uri().path());
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"QuizDash Host\"")],
        "Unauthorized",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use serial_test::serial;
    use tower::ServiceExt;

    fn enabled() -> AuthConfig {
        AuthConfig {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        }
    }

    fn router(config: AuthConfig) -> Router {
        Router::new()
            .route("/host", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                Arc::new(config),
                host_auth_middleware,
            ))
    }

    #[test]
    fn test_auth_config_disabled_when_incomplete() {
        let config = AuthConfig {
            username: None,
            password: None,
        };
        assert!(!config.is_enabled());
        assert!(config.validate("any", "thing"));

        let config = AuthConfig {
            username: Some("user".to_string()),
            password: None,
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_auth_config_enabled() {
        let config = enabled();
        assert!(config.is_enabled());
        assert!(config.validate("admin", "secret"));
        assert!(!config.validate("admin", "wrong"));
        assert!(!config.validate("wrong", "secret"));
        assert!(!config.validate("", ""));
    }

    #[test]
    #[serial]
    fn test_from_env_requires_both() {
        std::env::set_var("HOST_USERNAME", "admin");
        std::env::remove_var("HOST_PASSWORD");
        assert!(!AuthConfig::from_env().is_enabled());

        std::env::set_var("HOST_PASSWORD", " secret ");
        let config = AuthConfig::from_env();
        assert!(config.is_enabled());
        assert_eq!(config.password.as_deref(), Some("secret"));

        std::env::remove_var("HOST_USERNAME");
        std::env::remove_var("HOST_PASSWORD");
    }

    #[test]
    fn test_basic_credentials() {
        let mut headers = HeaderMap::new();
        // "admin:secret"
        headers.insert(header::AUTHORIZATION, "Basic YWRtaW46c2VjcmV0".parse().unwrap());
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "secret".to_string()))
        );

        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(basic_credentials(&headers), None);

        headers.insert(header::AUTHORIZATION, "Basic !!!".parse().unwrap());
        assert_eq!(basic_credentials(&headers), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
    }

    #[tokio::test]
    async fn test_middleware_rejects_missing_credentials() {
        let response = router(enabled())
            .oneshot(Request::builder().uri("/host").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn test_middleware_accepts_valid_credentials() {
        let response = router(enabled())
            .oneshot(
                Request::builder()
                    .uri("/host")
                    .header(header::AUTHORIZATION, "Basic YWRtaW46c2VjcmV0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_passes_through_when_disabled() {
        let config = AuthConfig {
            username: None,
            password: None,
        };
        let response = router(config)
            .oneshot(Request::builder().uri("/host").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
