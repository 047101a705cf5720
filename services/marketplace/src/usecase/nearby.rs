use uuid::Uuid;

use estate_domain::place::PlaceKind;

use crate::domain::repository::{NearbyPlacesPort, PropertyRepository};
use crate::domain::types::NearbyPlace;
use crate::error::MarketplaceError;

pub struct NearbyPlacesUseCase<P: PropertyRepository, N: NearbyPlacesPort> {
    pub properties: P,
    pub places: N,
}

impl<P: PropertyRepository, N: NearbyPlacesPort> NearbyPlacesUseCase<P, N> {
    pub async fn execute(
        &self,
        property_id: Uuid,
        kind: Option<PlaceKind>,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyPlace>, MarketplaceError> {
        let listing = self
            .properties
            .find_listing(property_id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        let radius_km = radius_km.filter(|r| r.is_finite() && *r >= 0.0);
        self.places.nearby(&listing.property, kind, radius_km).await
    }
}
