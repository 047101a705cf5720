use estate_domain::place::PlaceKind;

use crate::domain::repository::NearbyPlacesPort;
use crate::domain::types::{NearbyPlace, Property};
use crate::error::MarketplaceError;

/// Fixed directory of points of interest, one per kind, in kilometres.
const PLACES: [(PlaceKind, &str, f64); 6] = [
    (PlaceKind::School, "Local High School", 0.5),
    (PlaceKind::Hospital, "City Hospital", 1.2),
    (PlaceKind::Mall, "Central Mall", 2.4),
    (PlaceKind::Metro, "Metro Station", 0.8),
    (PlaceKind::Park, "Riverside Park", 1.0),
    (PlaceKind::Restaurant, "Spice Garden Restaurant", 0.3),
];

/// Stand-in for a maps provider. Returns the same places for every property.
#[derive(Clone, Copy, Default)]
pub struct StaticPlaceDirectory;

impl NearbyPlacesPort for StaticPlaceDirectory {
    async fn nearby(
        &self,
        _property: &Property,
        kind: Option<PlaceKind>,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyPlace>, MarketplaceError> {
        Ok(PLACES
            .iter()
            .filter(|(k, _, _)| kind.is_none_or(|wanted| *k == wanted))
            .filter(|(_, _, distance)| radius_km.is_none_or(|r| *distance <= r))
            .map(|(kind, name, distance)| NearbyPlace {
                kind: *kind,
                name: (*name).to_owned(),
                distance: *distance,
            })
            .collect())
    }
}
