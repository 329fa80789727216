use serde::Deserialize;
use ucademic_core::config::Config;

/// Marketplace service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct MarketplaceConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3000). Env var: `MARKETPLACE_PORT`.
    #[serde(default = "default_port")]
    pub marketplace_port: u16,
    /// Access-token lifetime (default 30). Env var: `ACCESS_TOKEN_TTL_MINUTES`.
    #[serde(default = "default_ttl_minutes")]
    pub access_token_ttl_minutes: u64,
    /// Origin allowed by CORS. Env var: `CORS_ALLOWED_ORIGIN`.
    #[serde(default = "default_cors_origin")]
    pub cors_allowed_origin: String,
}

fn default_port() -> u16 {
    3000
}

fn default_ttl_minutes() -> u64 {
    30
}

fn default_cors_origin() -> String {
    "http://localhost:4200".to_owned()
}

impl Config for MarketplaceConfig {}

impl MarketplaceConfig {
    pub fn access_token_ttl_seconds(&self) -> u64 {
        self.access_token_ttl_minutes * 60
    }
}
