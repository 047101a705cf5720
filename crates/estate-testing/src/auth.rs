//! Bearer-token helpers for router and integration tests.
//!
//! `MockAuth` signs a real access token with the test secret so requests go
//! through the same `Identity` extractor production traffic does.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use estate_auth_types::token::issue_token;
use estate_domain::user::UserRole;
use uuid::Uuid;

/// Secret shared by test routers and [`MockAuth`].
pub const TEST_JWT_SECRET: &str = "estate-test-jwt-secret";

/// Configurable identity attached to test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::User)
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    /// Access token signed with [`TEST_JWT_SECRET`].
    pub fn token(&self) -> String {
        issue_token(self.user_id, self.role, TEST_JWT_SECRET).unwrap()
    }

    /// `Authorization` header value, e.g. for `axum_test::TestRequest::authorization`.
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap()
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value());
        map
    }
}
