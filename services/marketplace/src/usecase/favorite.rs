use uuid::Uuid;

use crate::domain::repository::FavoriteRepository;
use crate::domain::types::FavoriteState;
use crate::error::MarketplaceError;

pub struct ToggleFavoriteUseCase<F: FavoriteRepository> {
    pub favorites: F,
}

impl<F: FavoriteRepository> ToggleFavoriteUseCase<F> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<FavoriteState, MarketplaceError> {
        let state = self
            .favorites
            .toggle(user_id, property_id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        tracing::debug!(
            %user_id,
            %property_id,
            is_favorited = state.is_favorited,
            favorites_count = state.favorites_count,
            "favorite toggled"
        );
        Ok(state)
    }
}
