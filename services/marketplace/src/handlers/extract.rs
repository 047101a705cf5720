use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use estate_auth_types::identity::Identity;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::MarketplaceError;
use crate::state::AppState;

/// Bearer identity resolved to a stored account. A valid token whose user
/// no longer exists is rejected like a bad token.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = MarketplaceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = <Identity as FromRequestParts<AppState>>::from_request_parts(parts, state);
        let users = state.user_repo();
        async move {
            let identity = identity.await?;
            let user = users
                .find_by_id(identity.user_id)
                .await?
                .ok_or_else(|| {
                    tracing::debug!(user_id = %identity.user_id, "token for unknown user");
                    MarketplaceError::Unauthorized
                })?;
            Ok(CurrentUser(user))
        }
    }
}
