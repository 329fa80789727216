use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use ucademic_core::error::GatewayError;
use ucademic_domain::codec::CodecError;
use ucademic_domain::course::CourseError;
use ucademic_domain::user::ProfileError;

/// Marketplace service error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("could not validate credentials")]
    Unauthenticated,
    #[error("instructor account required")]
    NotInstructor,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    InvalidInput(String),
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketplaceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gateway(e) => e.kind(),
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::NotInstructor => "NOT_INSTRUCTOR",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<ProfileError> for MarketplaceError {
    fn from(e: ProfileError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<CourseError> for MarketplaceError {
    fn from(e: CourseError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<CodecError> for MarketplaceError {
    fn from(e: CodecError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Gateway(e) => return e.into_response(),
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotInstructor | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Gateway errors log their own 500s above; 4xx are not logged.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let mut resp = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}
