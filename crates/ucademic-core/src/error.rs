use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;

/// Failures raised by the data-access gateway.
///
/// `NotFound` and `AlreadyExists` are expected, caller-recoverable outcomes
/// of a fetch. `InvalidUsage` is a programming defect and `Storage` an opaque
/// failure of the backing store; both end the request with a 500.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("invalid gateway usage: {0}")]
    InvalidUsage(&'static str),
    #[error("storage failure")]
    Storage(#[from] DbErr),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::InvalidUsage(_) | Self::Storage(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::InvalidUsage(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(_) | Self::AlreadyExists(_) => self.to_string(),
            Self::InvalidUsage(_) | Self::Storage(_) => "internal error".to_owned(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // 4xx are expected client outcomes; only the 500 path is logged.
        match &self {
            Self::InvalidUsage(reason) => {
                tracing::error!(reason, kind = "INTERNAL", "invalid gateway usage");
            }
            Self::Storage(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "storage failure");
            }
            Self::NotFound(_) | Self::AlreadyExists(_) => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.public_message(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
