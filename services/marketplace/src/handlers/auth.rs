use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::auth::{AccessToken, LoginUseCase, RegisterUseCase};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), MarketplaceError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        tokens: state.token_issuer(),
    };
    let token = usecase.execute(&body.email, &body.password).await?;
    Ok((StatusCode::CREATED, Json(token.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, MarketplaceError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        tokens: state.token_issuer(),
    };
    let token = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(token.into()))
}
