use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use estate_domain::activity::DocumentStatus;
use estate_domain::pagination::{Page, PageRequest, Sort};
use estate_domain::property::PropertySortBy;
use estate_domain::user::{Preferences, UserRole};
use estate_marketplace::domain::repository::{
    FavoriteRepository, MediaStore, NotificationRepository, PropertyRepository, ReviewRepository,
    UserRepository, VerificationRepository,
};
use estate_marketplace::domain::types::{
    FavoriteState, NewReview, Notification, Property, PropertyChanges, PropertyDetail,
    PropertyFilter, PropertyImage, PropertyListing, RatingSummary, Review, User, UserRef,
    VerificationDocument, VirtualTour,
};
use estate_marketplace::error::MarketplaceError;
use estate_marketplace::usecase::property::PropertyInput;

// ── InMemoryStore ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub properties: Vec<Property>,
    /// `(property_id, image)` in insertion order.
    pub images: Vec<(Uuid, PropertyImage)>,
    /// `(user_id, property_id)`, oldest first.
    pub favorites: Vec<(Uuid, Uuid)>,
    pub reviews: Vec<NewReview>,
    pub notifications: Vec<Notification>,
    pub documents: Vec<VerificationDocument>,
}

/// Every repository trait over one shared set of tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn add_user(&self, user: User) {
        self.tables.lock().unwrap().users.push(user);
    }

    pub fn property(&self, id: Uuid) -> Option<Property> {
        self.tables
            .lock()
            .unwrap()
            .properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

fn user_ref(tables: &Tables, id: Uuid) -> UserRef {
    let name = tables
        .users
        .iter()
        .find(|u| u.id == id)
        .map(|u| u.name.clone())
        .unwrap_or_default();
    UserRef { id, name }
}

fn listing(tables: &Tables, property: &Property) -> PropertyListing {
    PropertyListing {
        property: property.clone(),
        owner: user_ref(tables, property.owner_id),
        images: tables
            .images
            .iter()
            .filter(|(pid, _)| *pid == property.id)
            .map(|(_, image)| image.clone())
            .collect(),
    }
}

/// In-memory counterpart of the `WHERE` clause the database repository builds.
fn matches(filter: &PropertyFilter, property: &Property) -> bool {
    if let Some(search) = filter.search.as_deref() {
        let needle = search.to_lowercase();
        let hit = [&property.title, &property.description, &property.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }
    filter.property_type.is_none_or(|t| property.property_type == t)
        && filter.min_price.is_none_or(|min| property.price >= min)
        && filter.max_price.is_none_or(|max| property.price <= max)
        && filter.bedrooms.is_none_or(|n| property.bedrooms == Some(n))
        && filter.bathrooms.is_none_or(|n| property.bathrooms == Some(n))
        && filter.furnished.is_none_or(|f| property.furnished == Some(f))
}

fn compare(sort_by: PropertySortBy, a: &Property, b: &Property) -> Ordering {
    let (ordering, sort) = match sort_by {
        PropertySortBy::Price(sort) => (a.price.total_cmp(&b.price), sort),
        PropertySortBy::CreatedAt(sort) => (a.created_at.cmp(&b.created_at), sort),
    };
    let ordering = ordering.then_with(|| a.id.cmp(&b.id));
    match sort {
        Sort::Asc => ordering,
        Sort::Desc => ordering.reverse(),
    }
}

impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(MarketplaceError::EmailAlreadyInUse);
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update_preferences(
        &self,
        id: Uuid,
        preferences: &Preferences,
    ) -> Result<(), MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.preferences = preferences.clone();
        }
        Ok(())
    }
}

impl PropertyRepository for InMemoryStore {
    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<PropertyListing>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        let mut matched: Vec<&Property> = tables
            .properties
            .iter()
            .filter(|p| matches(filter, p))
            .collect();
        matched.sort_by(|a, b| compare(filter.sort_by, a, b));
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .map(|p| listing(&tables, p))
            .collect();
        Ok(Page::new(items, total, page))
    }

    async fn find_listing(&self, id: Uuid) -> Result<Option<PropertyListing>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .properties
            .iter()
            .find(|p| p.id == id)
            .map(|p| listing(&tables, p)))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PropertyDetail>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        let Some(property) = tables.properties.iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        let reviews = tables
            .reviews
            .iter()
            .filter(|r| r.property_id == id)
            .map(|r| Review {
                id: r.id,
                property_id: r.property_id,
                user: user_ref(&tables, r.user_id),
                rating: r.rating,
                comment: r.comment.clone(),
                created_at: r.created_at,
            })
            .collect();
        Ok(Some(PropertyDetail {
            listing: listing(&tables, property),
            reviews,
        }))
    }

    async fn create(
        &self,
        property: &Property,
        images: &[PropertyImage],
    ) -> Result<(), MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        tables.properties.push(property.clone());
        tables
            .images
            .extend(images.iter().map(|i| (property.id, i.clone())));
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &PropertyChanges,
        new_images: &[PropertyImage],
    ) -> Result<(), MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        let property = tables
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(MarketplaceError::PropertyNotFound)?;
        let c = changes.clone();
        if let Some(v) = c.title {
            property.title = v;
        }
        if let Some(v) = c.price {
            property.price = v;
        }
        if let Some(v) = c.location {
            property.location = v;
        }
        if let Some(v) = c.coordinates {
            property.coordinates = v;
        }
        if let Some(v) = c.description {
            property.description = v;
        }
        if let Some(v) = c.property_type {
            property.property_type = v;
        }
        if let Some(v) = c.size {
            property.size = v;
        }
        if let Some(v) = c.bedrooms {
            property.bedrooms = Some(v);
        }
        if let Some(v) = c.bathrooms {
            property.bathrooms = Some(v);
        }
        if let Some(v) = c.amenities {
            property.amenities = v;
        }
        if let Some(v) = c.furnished {
            property.furnished = Some(v);
        }
        if let Some(v) = c.featured {
            property.featured = v;
        }
        property.updated_at = Utc::now();
        tables
            .images
            .extend(new_images.iter().map(|i| (id, i.clone())));
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.properties.len();
        tables.properties.retain(|p| p.id != id);
        tables.images.retain(|(pid, _)| *pid != id);
        tables.favorites.retain(|(_, pid)| *pid != id);
        tables.reviews.retain(|r| r.property_id != id);
        Ok(tables.properties.len() < before)
    }

    async fn set_virtual_tour(
        &self,
        id: Uuid,
        tour: &VirtualTour,
    ) -> Result<(), MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(property) = tables.properties.iter_mut().find(|p| p.id == id) {
            property.virtual_tour = Some(tour.clone());
        }
        Ok(())
    }
}

impl FavoriteRepository for InMemoryStore {
    async fn toggle(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<FavoriteState>, MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.properties.iter().any(|p| p.id == property_id) {
            return Ok(None);
        }
        let pair = (user_id, property_id);
        let is_favorited = if tables.favorites.contains(&pair) {
            tables.favorites.retain(|f| *f != pair);
            false
        } else {
            tables.favorites.push(pair);
            true
        };
        let count = tables
            .favorites
            .iter()
            .filter(|(_, pid)| *pid == property_id)
            .count() as u32;
        if let Some(property) = tables.properties.iter_mut().find(|p| p.id == property_id) {
            property.favorites_count = count;
        }
        Ok(Some(FavoriteState {
            is_favorited,
            favorites_count: count,
        }))
    }

    async fn favorited_among(
        &self,
        user_id: Uuid,
        property_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .favorites
            .iter()
            .filter(|(uid, pid)| *uid == user_id && property_ids.contains(pid))
            .map(|(_, pid)| *pid)
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PropertyListing>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .favorites
            .iter()
            .rev()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, pid)| tables.properties.iter().find(|p| p.id == *pid))
            .map(|p| listing(&tables, p))
            .collect())
    }
}

impl ReviewRepository for InMemoryStore {
    async fn add(&self, review: &NewReview) -> Result<Option<RatingSummary>, MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.properties.iter().any(|p| p.id == review.property_id) {
            return Ok(None);
        }
        tables.reviews.push(review.clone());
        let ratings: Vec<f64> = tables
            .reviews
            .iter()
            .filter(|r| r.property_id == review.property_id)
            .map(|r| r.rating)
            .collect();
        let summary = RatingSummary {
            overall: ratings.iter().sum::<f64>() / ratings.len() as f64,
            count: ratings.len() as u32,
        };
        if let Some(property) = tables
            .properties
            .iter_mut()
            .find(|p| p.id == review.property_id)
        {
            property.rating_overall = summary.overall;
            property.rating_count = summary.count;
        }
        Ok(Some(summary))
    }
}

impl NotificationRepository for InMemoryStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, notification: &Notification) -> Result<(), MarketplaceError> {
        self.tables
            .lock()
            .unwrap()
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Notification>, MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .map(|n| {
                n.read = true;
                n.clone()
            }))
    }
}

impl VerificationRepository for InMemoryStore {
    async fn create(&self, document: &VerificationDocument) -> Result<(), MarketplaceError> {
        self.tables.lock().unwrap().documents.push(document.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VerificationDocument>, MarketplaceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .documents
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
        remarks: Option<&str>,
    ) -> Result<bool, MarketplaceError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(document) = tables
            .documents
            .iter_mut()
            .find(|d| d.id == document_id && d.user_id == user_id)
        else {
            return Ok(false);
        };
        document.status = status;
        document.remarks = remarks.map(str::to_owned);
        document.updated_at = Utc::now();
        Ok(true)
    }
}

// ── FakeMedia ────────────────────────────────────────────────────────────────

/// Image store double. Uploads whose payload contains `fail` are rejected.
#[derive(Clone, Default)]
pub struct FakeMedia {
    pub uploaded: Arc<Mutex<Vec<String>>>,
    pub destroyed: Arc<Mutex<Vec<String>>>,
}

impl MediaStore for FakeMedia {
    async fn upload(
        &self,
        data_uri: &str,
        folder: &str,
    ) -> Result<PropertyImage, MarketplaceError> {
        if data_uri.contains("fail") {
            return Err(MarketplaceError::Media(anyhow::anyhow!("upload rejected")));
        }
        let mut uploaded = self.uploaded.lock().unwrap();
        let public_id = format!("{folder}/{}", uploaded.len());
        uploaded.push(data_uri.to_owned());
        Ok(PropertyImage {
            url: format!("https://images.test/{public_id}.jpg"),
            public_id: Some(public_id),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MarketplaceError> {
        self.destroyed.lock().unwrap().push(public_id.to_owned());
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(name: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: String::new(),
        role: UserRole::User,
        email_verified: false,
        phone_verified: false,
        identity_verified: false,
        preferences: Preferences::default(),
        reward_points: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin(name: &str) -> User {
    User {
        role: UserRole::Admin,
        ..test_user(name)
    }
}

pub fn listing_input(title: &str, price: f64) -> PropertyInput {
    PropertyInput {
        title: Some(title.to_owned()),
        price: Some(price),
        location: Some("Koregaon Park, Pune".to_owned()),
        description: Some("Quiet street, close to the metro".to_owned()),
        property_type: Some("Apartment".to_owned()),
        size: Some(720.0),
        bedrooms: Some(2),
        bathrooms: Some(2),
        amenities: Some(vec!["Parking".to_owned()]),
        furnished: Some("Unfurnished".to_owned()),
        featured: None,
        images: vec![],
    }
}
