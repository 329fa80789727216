//! Mock bearer identity for integration tests.
//!
//! Signs real access tokens with [`TEST_JWT_SECRET`]; build the service state
//! with the same secret so its `BearerIdentity` extractor accepts them.

use axum::http::{HeaderMap, HeaderValue, header};
use ucademic_auth_types::token::issue_access_token;
use uuid::Uuid;

/// Secret shared by test tokens and the service under test.
pub const TEST_JWT_SECRET: &str = "ucademic-test-jwt-secret";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// A signed access token for this identity, valid for one hour.
    pub fn token(&self) -> String {
        issue_access_token(self.user_id, TEST_JWT_SECRET, 3600).unwrap()
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap()
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::AUTHORIZATION, self.authorization());
        map
    }
}
