//! `AuthAccount` extractor: pulls the context injected by the auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use vaultkeep_core::error::AppError;
use vaultkeep_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated account context available in handlers.
///
/// Requires the route to sit behind the session middleware; a missing
/// context means the route was wired outside the protected group.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub RequestContext);

impl AuthAccount {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthAccount {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthAccount)
            .ok_or_else(|| AppError::authentication("Missing authenticated context").into())
    }
}
