//! API key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::AppState;

/// Hex-encoded SHA-256 of an API key
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the API key from the Authorization header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Authentication middleware for the JSON API
///
/// When no key is configured every request passes through. Otherwise the
/// bearer token must hash to the configured value.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.api_key_hash.as_deref() else {
        return Ok(next.run(request).await);
    };

    let api_key = extract_api_key(&request).ok_or(AppError::Unauthorized)?;
    if hash_api_key(api_key) != expected {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_stable_and_hides_key() {
        let hash1 = hash_api_key("sk-test123");
        let hash2 = hash_api_key("sk-test123");
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, "sk-test123");
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn extracts_bearer_token() {
        let request = Request::builder()
            .header("Authorization", "Bearer sk-abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_api_key(&request), Some("sk-abc"));
    }

    #[test]
    fn ignores_other_schemes() {
        let request = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_api_key(&request), None);

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_api_key(&request), None);
    }
}
