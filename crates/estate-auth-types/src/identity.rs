//! Bearer-token identity extractors.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use estate_core::error::AppError;
use estate_domain::user::UserRole;
use http::HeaderMap;
use http::request::Parts;
use uuid::Uuid;

use crate::token::{AuthError, validate_access_token};

/// HS256 signing secret, pulled out of service state via `FromRef`.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller identity taken from `Authorization: Bearer <jwt>`.
///
/// As a required extractor, a missing or invalid token rejects with 401.
/// As `Option<Identity>`, any token problem yields `None` so public routes
/// treat the caller as anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

fn identity_from_headers(headers: &HeaderMap, secret: &JwtSecret) -> Result<Identity, AppError> {
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)?;
    let info = validate_access_token(bearer.token(), secret.as_str()).map_err(|e| {
        match e {
            AuthError::Expired => tracing::debug!("access token expired"),
            other => tracing::debug!(error = %other, "access token rejected"),
        }
        AppError::Unauthorized
    })?;
    Ok(Identity {
        user_id: info.user_id,
        role: info.role,
    })
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 declares `fn -> impl Future + Send`; resolve synchronously
    // and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = identity_from_headers(&parts.headers, &JwtSecret::from_ref(state));
        async move { result }
    }
}

impl<S> OptionalFromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let result = identity_from_headers(&parts.headers, &JwtSecret::from_ref(state)).ok();
        async move { Ok(result) }
    }
}
