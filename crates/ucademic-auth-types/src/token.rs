//! Bearer access-token issuing and validation.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token type reported to clients alongside the access token.
pub const TOKEN_TYPE: &str = "bearer";

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub access_token_exp: u64,
}

/// Errors returned while issuing or validating a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Signing(_) => "INTERNAL",
            _ => "UNAUTHENTICATED",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Signing(e) = &self {
            tracing::error!(error = %e, kind = "INTERNAL", "token signing failed");
            let body = serde_json::json!({"kind": "INTERNAL", "message": "internal error"});
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
        tracing::debug!(reason = %self, "bearer token rejected");
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": "could not validate credentials",
        });
        let mut resp = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        resp.headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        resp
    }
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `exp` | `exp` | expiry, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: u64,
}

// ── Issue ────────────────────────────────────────────────────────────────

/// Sign an HS256 access token for `user_id` valid for `ttl_seconds`.
pub fn issue_access_token(user_id: Uuid, secret: &str, ttl_seconds: u64) -> Result<String, AuthError> {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        exp: jsonwebtoken::get_current_timestamp() + ttl_seconds,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)
}

// ── Validate ─────────────────────────────────────────────────────────────

/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the identity it carries.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        access_token_exp: claims.exp,
    })
}
