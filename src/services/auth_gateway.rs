//! Auth gateway - Resolves an `Authorization` header value to a caller.
//!
//! Framework independent; the axum middleware is a thin wrapper around it.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::TokenService;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::{AppError, AppResult};

/// Authenticated caller identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Bearer token gateway over a token service.
pub struct AuthGateway {
    tokens: Arc<dyn TokenService>,
}

impl AuthGateway {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticate a request from its raw `Authorization` header value.
    ///
    /// Missing header, wrong scheme or empty token yield `Unauthenticated`.
    /// Token failures propagate as `ExpiredToken` or `InvalidToken`.
    pub fn authenticate(&self, authorization: Option<&str>) -> AppResult<AuthUser> {
        let token = authorization
            .and_then(|value| value.strip_prefix(BEARER_TOKEN_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthenticated)?;

        let identity = self.tokens.verify(token).map_err(|e| {
            tracing::warn!(code = e.code(), "Rejected bearer token");
            e
        })?;

        Ok(AuthUser {
            id: identity.user_id,
            email: identity.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::JwtTokenService;

    fn gateway() -> (AuthGateway, Arc<JwtTokenService>) {
        let tokens = Arc::new(JwtTokenService::new(
            b"test-secret-key-for-testing-only-32chars",
            3600,
        ));
        (AuthGateway::new(tokens.clone()), tokens)
    }

    #[test]
    fn test_missing_header() {
        let (gateway, _) = gateway();
        assert!(matches!(
            gateway.authenticate(None),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        let (gateway, _) = gateway();
        for header in ["Basic abc", "Bearer", "Bearer ", "Bearer    ", "token"] {
            assert!(
                matches!(gateway.authenticate(Some(header)), Err(AppError::Unauthenticated)),
                "header {:?}",
                header
            );
        }
    }

    #[test]
    fn test_garbage_token() {
        let (gateway, _) = gateway();
        assert!(matches!(
            gateway.authenticate(Some("Bearer garbage")),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let (gateway, tokens) = gateway();
        let issued = chrono::Utc::now().timestamp() - 7200;
        let token = tokens.issue_at(Uuid::new_v4(), "a@x.com", issued).unwrap();

        assert!(matches!(
            gateway.authenticate(Some(&format!("Bearer {}", token))),
            Err(AppError::ExpiredToken)
        ));
    }

    #[test]
    fn test_valid_token() {
        let (gateway, tokens) = gateway();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id, "a@x.com").unwrap();

        let user = gateway
            .authenticate(Some(&format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "a@x.com");
    }
}
