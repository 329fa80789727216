use anyhow::Context as _;

use ucademic_auth_types::identity::JwtSecret;
use ucademic_auth_types::token::{TOKEN_TYPE, issue_access_token};
use ucademic_domain::user::{validate_email, validate_password};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::MarketplaceError;
use crate::password::{hash_password, verify_password};

/// Bearer token handed out by register and login.
#[derive(Debug)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Signing parameters shared by the auth use cases.
#[derive(Clone)]
pub struct TokenIssuer {
    pub secret: JwtSecret,
    pub ttl_seconds: u64,
}

impl TokenIssuer {
    fn issue(&self, user: &User) -> Result<AccessToken, MarketplaceError> {
        let access_token = issue_access_token(user.id, &self.secret.0, self.ttl_seconds)
            .context("sign access token")?;
        Ok(AccessToken {
            access_token,
            token_type: TOKEN_TYPE,
        })
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
    pub tokens: TokenIssuer,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessToken, MarketplaceError> {
        validate_email(email)?;
        validate_password(password)?;
        let hashed = hash_password(password)
            .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
        let user = self.repo.create(email, &hashed).await?;
        tracing::info!(user_id = %user.id, "user registered");
        self.tokens.issue(&user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub tokens: TokenIssuer,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessToken, MarketplaceError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(MarketplaceError::InvalidCredentials)?;
        let matches = verify_password(password, &user.hashed_password)
            .map_err(|e| anyhow::anyhow!("verify password: {e}"))?;
        if !matches {
            return Err(MarketplaceError::InvalidCredentials);
        }
        self.tokens.issue(&user)
    }
}
