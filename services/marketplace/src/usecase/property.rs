use chrono::Utc;
use uuid::Uuid;

use estate_domain::pagination::{Page, PageRequest};
use estate_domain::property::{Amenity, Coordinates, Furnished, PropertyType};

use crate::domain::repository::{FavoriteRepository, MediaStore, PropertyRepository};
use crate::domain::types::{
    Property, PropertyChanges, PropertyDetail, PropertyFilter, PropertyListing, User, UserRef,
    VirtualTour,
};
use crate::error::MarketplaceError;
use crate::usecase::media::{PROPERTY_FOLDER, discard, is_data_uri, upload_all};

/// An item plus the caller's favorite flag. `None` for anonymous callers.
#[derive(Debug, Clone)]
pub struct Viewed<T> {
    pub item: T,
    pub is_favorited: Option<bool>,
}

/// Raw create/update payload. Create requires the core fields; update
/// validates whatever is present.
#[derive(Debug, Clone, Default)]
pub struct PropertyInput {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<String>,
    pub size: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub furnished: Option<String>,
    pub featured: Option<bool>,
    /// `data:image/...;base64,...` payloads.
    pub images: Vec<String>,
}

fn text(field: &str, value: String) -> Result<String, MarketplaceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MarketplaceError::validation(format!("{field} must not be empty")));
    }
    Ok(value.to_owned())
}

fn price(value: f64) -> Result<f64, MarketplaceError> {
    if !value.is_finite() || value < 0.0 {
        return Err(MarketplaceError::validation(
            "price must be a non-negative number",
        ));
    }
    Ok(value)
}

fn size(value: f64) -> Result<f64, MarketplaceError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MarketplaceError::validation("size must be a positive number"));
    }
    Ok(value)
}

/// Room counts must fit the database's `INTEGER` column.
fn rooms(field: &str, value: u32) -> Result<u32, MarketplaceError> {
    if i32::try_from(value).is_err() {
        return Err(MarketplaceError::validation(format!("{field} is out of range")));
    }
    Ok(value)
}

fn property_type(value: &str) -> Result<PropertyType, MarketplaceError> {
    value.parse().map_err(|_| {
        MarketplaceError::validation(
            "propertyType must be one of Apartment, House, Villa, Plot, Commercial",
        )
    })
}

fn furnished(value: &str) -> Result<Furnished, MarketplaceError> {
    value.parse().map_err(|_| {
        MarketplaceError::validation(
            "furnished must be one of Unfurnished, Semi-Furnished, Fully-Furnished",
        )
    })
}

/// Parse and deduplicate, keeping first-seen order.
fn amenities(values: &[String]) -> Result<Vec<Amenity>, MarketplaceError> {
    let mut out: Vec<Amenity> = Vec::with_capacity(values.len());
    for value in values {
        let amenity = value
            .parse::<Amenity>()
            .map_err(|e| MarketplaceError::validation(e.to_string()))?;
        if !out.contains(&amenity) {
            out.push(amenity);
        }
    }
    Ok(out)
}

fn check_images(images: &[String]) -> Result<(), MarketplaceError> {
    if images.iter().all(|i| is_data_uri(i, "image/")) {
        Ok(())
    } else {
        Err(MarketplaceError::validation(
            "images must be base64 data:image URIs",
        ))
    }
}

fn require<T>(field: &str, value: Option<T>) -> Result<T, MarketplaceError> {
    value.ok_or_else(|| MarketplaceError::validation(format!("{field} is required")))
}

fn ensure_owner(listing: &PropertyListing, user: &User) -> Result<(), MarketplaceError> {
    if listing.property.owner_id != user.id {
        tracing::debug!(
            property_id = %listing.property.id,
            user_id = %user.id,
            "rejected mutation by non-owner"
        );
        return Err(MarketplaceError::NotPropertyOwner);
    }
    Ok(())
}

// ── ListProperties ───────────────────────────────────────────────────────────

pub struct ListPropertiesUseCase<P: PropertyRepository, F: FavoriteRepository> {
    pub properties: P,
    pub favorites: F,
}

impl<P: PropertyRepository, F: FavoriteRepository> ListPropertiesUseCase<P, F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        filter: PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<Viewed<PropertyListing>>, MarketplaceError> {
        let page = self.properties.list(&filter, page.clamped()).await?;

        let Some(viewer) = viewer else {
            return Ok(page.map(|item| Viewed {
                item,
                is_favorited: None,
            }));
        };
        let ids: Vec<Uuid> = page.items.iter().map(|l| l.property.id).collect();
        let favorited = self.favorites.favorited_among(viewer, &ids).await?;
        Ok(page.map(|item| {
            let is_favorited = favorited.contains(&item.property.id);
            Viewed {
                item,
                is_favorited: Some(is_favorited),
            }
        }))
    }
}

// ── GetProperty ──────────────────────────────────────────────────────────────

pub struct GetPropertyUseCase<P: PropertyRepository, F: FavoriteRepository> {
    pub properties: P,
    pub favorites: F,
}

impl<P: PropertyRepository, F: FavoriteRepository> GetPropertyUseCase<P, F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        id: Uuid,
    ) -> Result<Viewed<PropertyDetail>, MarketplaceError> {
        let detail = self
            .properties
            .find_detail(id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        let is_favorited = match viewer {
            Some(viewer) => Some(
                self.favorites
                    .favorited_among(viewer, &[id])
                    .await?
                    .contains(&id),
            ),
            None => None,
        };
        Ok(Viewed {
            item: detail,
            is_favorited,
        })
    }
}

// ── CreateProperty ───────────────────────────────────────────────────────────

pub struct CreatePropertyUseCase<P: PropertyRepository, M: MediaStore> {
    pub properties: P,
    pub media: M,
}

impl<P: PropertyRepository, M: MediaStore> CreatePropertyUseCase<P, M> {
    pub async fn execute(
        &self,
        owner: &User,
        input: PropertyInput,
    ) -> Result<PropertyDetail, MarketplaceError> {
        let title = text("title", require("title", input.title)?)?;
        let price = price(require("price", input.price)?)?;
        let location = text("location", require("location", input.location)?)?;
        let description = text("description", require("description", input.description)?)?;
        let property_type = property_type(&require("propertyType", input.property_type)?)?;
        let size = size(require("size", input.size)?)?;
        let amenities = amenities(input.amenities.as_deref().unwrap_or_default())?;
        let furnished = input.furnished.as_deref().map(furnished).transpose()?;
        let bedrooms = input.bedrooms.map(|n| rooms("bedrooms", n)).transpose()?;
        let bathrooms = input.bathrooms.map(|n| rooms("bathrooms", n)).transpose()?;
        check_images(&input.images)?;

        let now = Utc::now();
        let property = Property {
            id: Uuid::now_v7(),
            owner_id: owner.id,
            title,
            price,
            coordinates: location.parse::<Coordinates>().ok(),
            location,
            description,
            property_type,
            size,
            bedrooms,
            bathrooms,
            amenities,
            furnished,
            featured: input.featured.unwrap_or(false),
            favorites_count: 0,
            virtual_tour: None,
            rating_overall: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        };

        let images = upload_all(&self.media, &input.images, PROPERTY_FOLDER).await?;
        if let Err(e) = self.properties.create(&property, &images).await {
            discard(&self.media, &images).await;
            return Err(e);
        }
        tracing::info!(property_id = %property.id, owner_id = %owner.id, "property created");

        Ok(PropertyDetail {
            listing: PropertyListing {
                property,
                owner: UserRef {
                    id: owner.id,
                    name: owner.name.clone(),
                },
                images,
            },
            reviews: vec![],
        })
    }
}

// ── UpdateProperty ───────────────────────────────────────────────────────────

pub struct UpdatePropertyUseCase<P: PropertyRepository, M: MediaStore> {
    pub properties: P,
    pub media: M,
}

impl<P: PropertyRepository, M: MediaStore> UpdatePropertyUseCase<P, M> {
    pub async fn execute(
        &self,
        user: &User,
        id: Uuid,
        input: PropertyInput,
    ) -> Result<PropertyDetail, MarketplaceError> {
        let listing = self
            .properties
            .find_listing(id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        ensure_owner(&listing, user)?;

        let location = input.location.map(|l| text("location", l)).transpose()?;
        let changes = PropertyChanges {
            title: input.title.map(|t| text("title", t)).transpose()?,
            price: input.price.map(price).transpose()?,
            coordinates: location
                .as_deref()
                .map(|l| l.parse::<Coordinates>().ok()),
            location,
            description: input
                .description
                .map(|d| text("description", d))
                .transpose()?,
            property_type: input.property_type.as_deref().map(property_type).transpose()?,
            size: input.size.map(size).transpose()?,
            bedrooms: input.bedrooms.map(|n| rooms("bedrooms", n)).transpose()?,
            bathrooms: input.bathrooms.map(|n| rooms("bathrooms", n)).transpose()?,
            amenities: input.amenities.as_deref().map(amenities).transpose()?,
            furnished: input.furnished.as_deref().map(furnished).transpose()?,
            featured: input.featured,
        };
        check_images(&input.images)?;

        let new_images = upload_all(&self.media, &input.images, PROPERTY_FOLDER).await?;
        if let Err(e) = self.properties.update(id, &changes, &new_images).await {
            discard(&self.media, &new_images).await;
            return Err(e);
        }
        tracing::info!(property_id = %id, added_images = new_images.len(), "property updated");

        self.properties
            .find_detail(id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)
    }
}

// ── DeleteProperty ───────────────────────────────────────────────────────────

pub struct DeletePropertyUseCase<P: PropertyRepository, M: MediaStore> {
    pub properties: P,
    pub media: M,
}

impl<P: PropertyRepository, M: MediaStore> DeletePropertyUseCase<P, M> {
    pub async fn execute(&self, user: &User, id: Uuid) -> Result<(), MarketplaceError> {
        let listing = self
            .properties
            .find_listing(id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        ensure_owner(&listing, user)?;

        if !self.properties.delete(id).await? {
            return Err(MarketplaceError::PropertyNotFound);
        }
        tracing::info!(property_id = %id, "property deleted");

        discard(&self.media, &listing.images).await;
        Ok(())
    }
}

// ── AddVirtualTour ───────────────────────────────────────────────────────────

pub struct VirtualTourInput {
    pub tour_url: Option<String>,
    pub provider: Option<String>,
}

pub struct AddVirtualTourUseCase<P: PropertyRepository> {
    pub properties: P,
}

impl<P: PropertyRepository> AddVirtualTourUseCase<P> {
    pub async fn execute(
        &self,
        user: &User,
        id: Uuid,
        input: VirtualTourInput,
    ) -> Result<PropertyDetail, MarketplaceError> {
        let raw = require("tourUrl", input.tour_url)?;
        let url = url::Url::parse(raw.trim())
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| MarketplaceError::validation("tourUrl must be an http(s) URL"))?;
        let tour = VirtualTour {
            url: url.to_string(),
            provider: input
                .provider
                .map(|p| p.trim().to_owned())
                .filter(|p| !p.is_empty()),
        };

        let listing = self
            .properties
            .find_listing(id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)?;
        ensure_owner(&listing, user)?;

        self.properties.set_virtual_tour(id, &tour).await?;
        self.properties
            .find_detail(id)
            .await?
            .ok_or(MarketplaceError::PropertyNotFound)
    }
}
