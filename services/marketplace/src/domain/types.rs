use chrono::{DateTime, Utc};
use uuid::Uuid;

use estate_domain::activity::{DocumentKind, DocumentStatus, NotificationKind};
use estate_domain::place::PlaceKind;
use estate_domain::property::{Amenity, Coordinates, Furnished, PropertySortBy, PropertyType};
use estate_domain::user::{Preferences, RewardTier, UserRole};

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub identity_verified: bool,
    pub preferences: Preferences,
    pub reward_points: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn reward_tier(&self) -> RewardTier {
        RewardTier::from_points(self.reward_points)
    }
}

/// Minimal user reference embedded in listings and reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
}

/// Uploaded image. `public_id` is the image store handle used for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyImage {
    pub url: String,
    pub public_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualTour {
    pub url: String,
    pub provider: Option<String>,
}

/// Property row as stored. Images, owner and reviews live in their own tables.
#[derive(Debug, Clone)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub price: f64,
    /// Free text as submitted.
    pub location: String,
    /// Set when `location` is a valid `"lat,lng"` pair.
    pub coordinates: Option<Coordinates>,
    pub description: String,
    pub property_type: PropertyType,
    pub size: f64,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: Vec<Amenity>,
    pub furnished: Option<Furnished>,
    pub featured: bool,
    /// Mirrors `COUNT(*)` of the favorites relation; written only by the toggle.
    pub favorites_count: u32,
    pub virtual_tour: Option<VirtualTour>,
    /// Mean of all review ratings; written only when a review is added.
    pub rating_overall: f64,
    pub rating_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A property with its owner and ordered images resolved.
#[derive(Debug, Clone)]
pub struct PropertyListing {
    pub property: Property,
    pub owner: UserRef,
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user: UserRef,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing plus its reviews, oldest first.
#[derive(Debug, Clone)]
pub struct PropertyDetail {
    pub listing: PropertyListing,
    pub reviews: Vec<Review>,
}

/// Column-scoped property edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    /// `Some(None)` clears stored coordinates.
    pub coordinates: Option<Option<Coordinates>>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub size: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: Option<Vec<Amenity>>,
    pub furnished: Option<Furnished>,
    pub featured: Option<bool>,
}

/// Listing filters. `None` means "no constraint"; all present constraints AND together.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub search: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub furnished: Option<Furnished>,
    pub sort_by: PropertySortBy,
}

/// Result of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteState {
    pub is_favorited: bool,
    pub favorites_count: u32,
}

/// Recomputed rating aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub overall: f64,
    pub count: u32,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct VerificationDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: DocumentKind,
    pub url: String,
    pub public_id: Option<String>,
    pub status: DocumentStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub kind: PlaceKind,
    pub name: String,
    /// Kilometres from the property.
    pub distance: f64,
}
