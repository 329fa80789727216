//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use uuid::Uuid;

use crate::token::{AuthError, validate_access_token};

/// HS256 signing secret, pulled from application state via [`FromRef`].
#[derive(Debug, Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Caller identity from `Authorization: Bearer <jwt>`.
///
/// Rejects with 401 and `WWW-Authenticate: Bearer` when the header is
/// missing or the token does not validate. Whether the user still exists is
/// checked by the use case that loads it.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    // Header parsing and validation are synchronous; the returned future
    // borrows nothing from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(Authorization(bearer)) => validate_access_token(bearer.token(), &secret.0)
                .map(|info| Self {
                    user_id: info.user_id,
                }),
            None => Err(AuthError::MissingToken),
        };

        async move { result }
    }
}
