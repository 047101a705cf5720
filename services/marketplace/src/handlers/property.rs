use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use estate_auth_types::identity::Identity;
use estate_domain::pagination::PageRequest;
use estate_domain::place::PlaceKind;
use estate_domain::property::{Amenity, Coordinates, Furnished, PropertySortBy, PropertyType};

use crate::domain::types::{
    FavoriteState, NearbyPlace, PropertyDetail, PropertyFilter, PropertyListing, Review,
};
use crate::error::MarketplaceError;
use crate::handlers::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::favorite::ToggleFavoriteUseCase;
use crate::usecase::nearby::NearbyPlacesUseCase;
use crate::usecase::property::{
    AddVirtualTourUseCase, CreatePropertyUseCase, DeletePropertyUseCase, GetPropertyUseCase,
    ListPropertiesUseCase, PropertyInput, UpdatePropertyUseCase, Viewed, VirtualTourInput,
};
use crate::usecase::rating::{AddRatingUseCase, RatingInput};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserRefResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize)]
pub struct VirtualTourResponse {
    pub url: String,
    pub provider: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user: UserRefResponse,
    pub rating: f64,
    pub comment: Option<String>,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            user: UserRefResponse {
                id: r.user.id,
                name: r.user.name,
            },
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct RatingsResponse {
    pub overall: f64,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub description: String,
    pub images: Vec<String>,
    pub property_type: PropertyType,
    pub size: f64,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: Vec<Amenity>,
    pub furnished: Option<Furnished>,
    pub featured: bool,
    pub owner: UserRefResponse,
    pub favorites_count: u32,
    pub virtual_tour: Option<VirtualTourResponse>,
    pub ratings: RatingsResponse,
    /// Present only for authenticated callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorited: Option<bool>,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PropertyResponse {
    fn build(
        listing: PropertyListing,
        reviews: Option<Vec<Review>>,
        is_favorited: Option<bool>,
    ) -> Self {
        let PropertyListing {
            property: p,
            owner,
            images,
        } = listing;
        Self {
            id: p.id,
            title: p.title,
            price: p.price,
            location: p.location,
            coordinates: p.coordinates,
            description: p.description,
            images: images.into_iter().map(|i| i.url).collect(),
            property_type: p.property_type,
            size: p.size,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            amenities: p.amenities,
            furnished: p.furnished,
            featured: p.featured,
            owner: UserRefResponse {
                id: owner.id,
                name: owner.name,
            },
            favorites_count: p.favorites_count,
            virtual_tour: p.virtual_tour.map(|t| VirtualTourResponse {
                url: t.url,
                provider: t.provider,
            }),
            ratings: RatingsResponse {
                overall: p.rating_overall,
                count: p.rating_count,
                reviews: reviews.map(|rs| rs.into_iter().map(ReviewResponse::from).collect()),
            },
            is_favorited,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }

    pub fn from_listing(viewed: Viewed<PropertyListing>) -> Self {
        Self::build(viewed.item, None, viewed.is_favorited)
    }

    pub fn from_detail(detail: PropertyDetail, is_favorited: Option<bool>) -> Self {
        Self::build(detail.listing, Some(detail.reviews), is_favorited)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyResponse>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total: u64,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub is_favorited: bool,
    pub favorites_count: u32,
}

impl From<FavoriteState> for FavoriteResponse {
    fn from(s: FavoriteState) -> Self {
        Self {
            is_favorited: s.is_favorited,
            favorites_count: s.favorites_count,
        }
    }
}

#[derive(Serialize)]
pub struct NearbyPlaceResponse {
    #[serde(rename = "type")]
    pub kind: PlaceKind,
    pub name: String,
    pub distance: f64,
}

impl From<NearbyPlace> for NearbyPlaceResponse {
    fn from(p: NearbyPlace) -> Self {
        Self {
            kind: p.kind,
            name: p.name,
            distance: p.distance,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub search: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub furnished: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn price(value: Option<&str>) -> Option<f64> {
    non_empty(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn count(value: Option<&str>) -> Option<u32> {
    non_empty(value)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|n| i32::try_from(*n).is_ok())
}

impl PropertyListQuery {
    /// Lenient conversion: unparseable or empty values drop the constraint.
    pub fn into_filter(self) -> (PropertyFilter, PageRequest) {
        let filter = PropertyFilter {
            search: non_empty(self.search.as_deref()).map(str::to_owned),
            property_type: non_empty(self.property_type.as_deref()).and_then(|v| v.parse().ok()),
            min_price: price(self.min_price.as_deref()),
            max_price: price(self.max_price.as_deref()),
            bedrooms: count(self.bedrooms.as_deref()),
            bathrooms: count(self.bathrooms.as_deref()),
            furnished: non_empty(self.furnished.as_deref()).and_then(|v| v.parse().ok()),
            sort_by: non_empty(self.sort_by.as_deref())
                .and_then(PropertySortBy::from_query)
                .unwrap_or_default(),
        };
        let page = PageRequest::from_query(self.page.as_deref(), self.limit.as_deref());
        (filter, page)
    }
}

fn parse_query<T: serde::de::DeserializeOwned + Default>(raw: Option<&str>) -> T {
    raw.and_then(|q| serde_qs::from_str(q).ok()).unwrap_or_default()
}

// ── GET /api/properties ──────────────────────────────────────────────────────

pub async fn list_properties(
    viewer: Option<Identity>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<PropertyListResponse>, MarketplaceError> {
    let query: PropertyListQuery = parse_query(raw_query.as_deref());
    let (filter, page) = query.into_filter();

    let usecase = ListPropertiesUseCase {
        properties: state.property_repo(),
        favorites: state.favorite_repo(),
    };
    let page = usecase.execute(viewer.map(|v| v.user_id), filter, page).await?;
    let total_pages = page.total_pages();
    Ok(Json(PropertyListResponse {
        current_page: page.page,
        total_pages,
        total: page.total,
        properties: page
            .items
            .into_iter()
            .map(PropertyResponse::from_listing)
            .collect(),
    }))
}

// ── GET /api/properties/{id} ─────────────────────────────────────────────────

pub async fn get_property(
    viewer: Option<Identity>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, MarketplaceError> {
    let usecase = GetPropertyUseCase {
        properties: state.property_repo(),
        favorites: state.favorite_repo(),
    };
    let viewed = usecase.execute(viewer.map(|v| v.user_id), id).await?;
    Ok(Json(PropertyResponse::from_detail(
        viewed.item,
        viewed.is_favorited,
    )))
}

// ── POST /api/properties, PUT /api/properties/{id} ───────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
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
    /// Base64 `data:image/...` URIs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<PropertyRequest> for PropertyInput {
    fn from(body: PropertyRequest) -> Self {
        Self {
            title: body.title,
            price: body.price,
            location: body.location,
            description: body.description,
            property_type: body.property_type,
            size: body.size,
            bedrooms: body.bedrooms,
            bathrooms: body.bathrooms,
            amenities: body.amenities,
            furnished: body.furnished,
            featured: body.featured,
            images: body.images,
        }
    }
}

pub async fn create_property(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<PropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>), MarketplaceError> {
    let usecase = CreatePropertyUseCase {
        properties: state.property_repo(),
        media: state.media(),
    };
    let detail = usecase.execute(&user, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(PropertyResponse::from_detail(detail, None)),
    ))
}

pub async fn update_property(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PropertyRequest>,
) -> Result<Json<PropertyResponse>, MarketplaceError> {
    let usecase = UpdatePropertyUseCase {
        properties: state.property_repo(),
        media: state.media(),
    };
    let detail = usecase.execute(&user, id, body.into()).await?;
    Ok(Json(PropertyResponse::from_detail(detail, None)))
}

// ── DELETE /api/properties/{id} ──────────────────────────────────────────────

pub async fn delete_property(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, MarketplaceError> {
    let usecase = DeletePropertyUseCase {
        properties: state.property_repo(),
        media: state.media(),
    };
    usecase.execute(&user, id).await?;
    Ok(Json(MessageResponse {
        message: "Property deleted successfully",
    }))
}

// ── POST /api/properties/{id}/favorite ───────────────────────────────────────

pub async fn toggle_favorite(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, MarketplaceError> {
    let usecase = ToggleFavoriteUseCase {
        favorites: state.favorite_repo(),
    };
    let favorite = usecase.execute(user.id, id).await?;
    Ok(Json(favorite.into()))
}

// ── POST /api/properties/{id}/ratings ────────────────────────────────────────

#[derive(Deserialize)]
pub struct RatingRequest {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

pub async fn add_rating(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RatingRequest>,
) -> Result<Json<PropertyResponse>, MarketplaceError> {
    let usecase = AddRatingUseCase {
        reviews: state.review_repo(),
        properties: state.property_repo(),
        notifications: state.notification_repo(),
    };
    let detail = usecase
        .execute(
            user.id,
            id,
            RatingInput {
                rating: body.rating,
                comment: body.comment,
            },
        )
        .await?;
    Ok(Json(PropertyResponse::from_detail(detail, None)))
}

// ── POST /api/properties/{id}/virtual-tour ───────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualTourRequest {
    pub tour_url: Option<String>,
    pub provider: Option<String>,
}

pub async fn add_virtual_tour(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VirtualTourRequest>,
) -> Result<Json<PropertyResponse>, MarketplaceError> {
    let usecase = AddVirtualTourUseCase {
        properties: state.property_repo(),
    };
    let detail = usecase
        .execute(
            &user,
            id,
            VirtualTourInput {
                tour_url: body.tour_url,
                provider: body.provider,
            },
        )
        .await?;
    Ok(Json(PropertyResponse::from_detail(detail, None)))
}

// ── GET /api/properties/{id}/nearby ──────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct NearbyQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub radius: Option<String>,
}

pub async fn get_nearby_places(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<NearbyPlaceResponse>>, MarketplaceError> {
    let query: NearbyQuery = parse_query(raw_query.as_deref());
    let kind = non_empty(query.kind.as_deref()).and_then(|k| k.parse().ok());
    let radius = price(query.radius.as_deref());

    let usecase = NearbyPlacesUseCase {
        properties: state.property_repo(),
        places: state.places,
    };
    let places = usecase.execute(id, kind, radius).await?;
    Ok(Json(places.into_iter().map(Into::into).collect()))
}
