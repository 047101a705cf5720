#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use uuid::Uuid;

use estate_domain::activity::DocumentStatus;
use estate_domain::pagination::{Page, PageRequest};
use estate_domain::place::PlaceKind;
use estate_domain::user::Preferences;

use crate::domain::types::{
    FavoriteState, NearbyPlace, NewReview, Notification, Property, PropertyChanges,
    PropertyDetail, PropertyFilter, PropertyImage, PropertyListing, RatingSummary, User,
    VerificationDocument, VirtualTour,
};
use crate::error::MarketplaceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketplaceError>;

    /// `email` must already be normalized (trimmed, lower-cased).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError>;

    /// Fails with `EmailAlreadyInUse` when the unique email index rejects the row.
    async fn create(&self, user: &User) -> Result<(), MarketplaceError>;

    async fn update_preferences(
        &self,
        id: Uuid,
        preferences: &Preferences,
    ) -> Result<(), MarketplaceError>;
}

/// Repository for property listings.
pub trait PropertyRepository: Send + Sync {
    /// Filtered, sorted page. Ties on the sort key are broken by id.
    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<PropertyListing>, MarketplaceError>;

    async fn find_listing(&self, id: Uuid) -> Result<Option<PropertyListing>, MarketplaceError>;

    async fn find_detail(&self, id: Uuid) -> Result<Option<PropertyDetail>, MarketplaceError>;

    async fn create(
        &self,
        property: &Property,
        images: &[PropertyImage],
    ) -> Result<(), MarketplaceError>;

    /// Write only the columns present in `changes` and append `new_images`
    /// after the existing ones. Never touches favorite or rating aggregates.
    async fn update(
        &self,
        id: Uuid,
        changes: &PropertyChanges,
        new_images: &[PropertyImage],
    ) -> Result<(), MarketplaceError>;

    /// Delete the property and everything that cascades from it.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, MarketplaceError>;

    async fn set_virtual_tour(&self, id: Uuid, tour: &VirtualTour)
    -> Result<(), MarketplaceError>;
}

/// The authoritative user ↔ property favorites relation.
pub trait FavoriteRepository: Send + Sync {
    /// Flip membership atomically and persist the recomputed count.
    /// Returns `None` if the property does not exist.
    async fn toggle(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<FavoriteState>, MarketplaceError>;

    /// Subset of `property_ids` the user has favorited.
    async fn favorited_among(
        &self,
        user_id: Uuid,
        property_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, MarketplaceError>;

    /// The user's favorited properties, most recently favorited first.
    async fn list_for_user(&self, user_id: Uuid)
    -> Result<Vec<PropertyListing>, MarketplaceError>;
}

/// Repository for property reviews.
pub trait ReviewRepository: Send + Sync {
    /// Insert the review and persist the recomputed aggregate in one transaction.
    /// Returns `None` if the property does not exist.
    async fn add(&self, review: &NewReview) -> Result<Option<RatingSummary>, MarketplaceError>;
}

/// Repository for in-app notifications.
pub trait NotificationRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>, MarketplaceError>;

    async fn create(&self, notification: &Notification) -> Result<(), MarketplaceError>;

    /// Returns the updated notification, or `None` if it is not the user's.
    async fn mark_read(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Notification>, MarketplaceError>;
}

/// Repository for identity verification documents.
pub trait VerificationRepository: Send + Sync {
    async fn create(&self, document: &VerificationDocument) -> Result<(), MarketplaceError>;

    /// Oldest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VerificationDocument>, MarketplaceError>;

    /// Returns `false` if no document `document_id` belongs to `user_id`.
    async fn update_status(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
        remarks: Option<&str>,
    ) -> Result<bool, MarketplaceError>;
}

/// Port for the remote image store.
pub trait MediaStore: Send + Sync {
    /// Upload a `data:` URI into `folder`.
    async fn upload(&self, data_uri: &str, folder: &str) -> Result<PropertyImage, MarketplaceError>;

    async fn destroy(&self, public_id: &str) -> Result<(), MarketplaceError>;
}

/// Port for nearby points of interest.
pub trait NearbyPlacesPort: Send + Sync {
    async fn nearby(
        &self,
        property: &Property,
        kind: Option<PlaceKind>,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyPlace>, MarketplaceError>;
}
