//! Authentication middleware for Axum
//!
//! The request gate. Verification is a pure function of (token, server
//! secret, current time). No database lookup happens here; handlers that
//! need the full user record re-fetch it themselves.
//!
//! Gating is route policy, not per-route wiring: the gate runs on every
//! request, resolves an identity when a token is present, and only
//! rejects when the route is not in the public allowlist.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::jwt::JwtManager;
use crate::error::ApiError;

/// Authenticated identity attached to request extensions by the gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    /// Token id of the credential that admitted this request.
    pub token_id: String,
}

/// State needed for authentication
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: JwtManager,
    /// Serve catalog reads without a token when set.
    pub public_catalog: bool,
}

/// Extract bearer token from the Authorization header.
fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(String::from)
}

/// Routes reachable without a token.
///
/// Login and registration are always open; the catalog reads are open
/// only when the server is configured with a public catalog.
fn is_public_route(method: &Method, path: &str, public_catalog: bool) -> bool {
    match (method, path) {
        (&Method::GET, "/") => true,
        (&Method::POST, "/login") => true,
        (&Method::POST, "/users") => true,
        (&Method::GET, _) if public_catalog => {
            path == "/movies"
                || path.starts_with("/movies/")
                || path.starts_with("/genres/")
                || path.starts_with("/directors/")
        }
        _ => false,
    }
}

fn authenticate(auth_state: &AuthState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = auth_state
        .jwt_manager
        .validate_token(token)
        .map_err(|_| ApiError::Unauthenticated)?;

    Ok(AuthUser {
        username: claims.sub,
        token_id: claims.jti,
    })
}

/// The request gate.
///
/// Resolves an identity into request extensions when a valid bearer
/// token is present. Public routes proceed either way; everything else
/// is rejected with 401 when no identity resolved.
pub async fn require_auth(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let public = is_public_route(request.method(), &path, auth_state.public_catalog);

    let auth_result = match extract_bearer_token(&request) {
        Some(token) => authenticate(&auth_state, &token),
        None => Err(ApiError::Unauthenticated),
    };

    match auth_result {
        Ok(auth_user) => {
            tracing::debug!(
                path = %path,
                username = %auth_user.username,
                jti = %auth_user.token_id,
                "request authenticated"
            );
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        Err(_) if public => {
            // Anonymous access is fine here; a bad token is simply not an
            // identity.
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %path, "rejecting unauthenticated request");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth_header(value: &str) -> Request {
        Request::builder()
            .uri("/movies")
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let request = request_with_auth_header("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_token(&request),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn ignores_non_bearer_schemes() {
        let request = request_with_auth_header("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&request), None);

        let request = Request::builder()
            .uri("/movies")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_bearer_token(&request), None);
    }

    #[test]
    fn login_and_registration_are_always_public() {
        for public_catalog in [false, true] {
            assert!(is_public_route(&Method::POST, "/login", public_catalog));
            assert!(is_public_route(&Method::POST, "/users", public_catalog));
            assert!(is_public_route(&Method::GET, "/", public_catalog));
        }
    }

    #[test]
    fn catalog_gating_follows_policy() {
        assert!(!is_public_route(&Method::GET, "/movies", false));
        assert!(is_public_route(&Method::GET, "/movies", true));
        assert!(is_public_route(&Method::GET, "/movies/The%20Third%20Man", true));
        assert!(is_public_route(&Method::GET, "/genres/Film%20Noir", true));
        assert!(is_public_route(&Method::GET, "/directors/Carol%20Reed", true));
    }

    #[test]
    fn user_routes_are_never_public() {
        for public_catalog in [false, true] {
            assert!(!is_public_route(&Method::GET, "/users", public_catalog));
            assert!(!is_public_route(&Method::GET, "/users/jdoe1", public_catalog));
            assert!(!is_public_route(&Method::PUT, "/users/jdoe1", public_catalog));
            assert!(!is_public_route(&Method::DELETE, "/users/jdoe1", public_catalog));
            assert!(!is_public_route(
                &Method::POST,
                "/users/jdoe1/movies/7b4f3c6e-0000-0000-0000-000000000000",
                public_catalog
            ));
        }
    }

    #[test]
    fn authenticate_resolves_identity_from_valid_token() {
        let auth_state = AuthState {
            jwt_manager: JwtManager::new("test-jwt-secret-key-for-testing-only", 24),
            public_catalog: false,
        };
        let (token, jti) = auth_state.jwt_manager.generate_token("jdoe1").unwrap();

        let auth_user = authenticate(&auth_state, &token).unwrap();
        assert_eq!(auth_user.username, "jdoe1");
        assert_eq!(auth_user.token_id, jti);
    }

    #[test]
    fn authenticate_rejects_token_from_other_secret() {
        let auth_state = AuthState {
            jwt_manager: JwtManager::new("test-jwt-secret-key-for-testing-only", 24),
            public_catalog: false,
        };
        let other = JwtManager::new("a-completely-different-secret-key!", 24);
        let (token, _) = other.generate_token("jdoe1").unwrap();

        assert!(matches!(
            authenticate(&auth_state, &token),
            Err(ApiError::Unauthenticated)
        ));
    }
}
