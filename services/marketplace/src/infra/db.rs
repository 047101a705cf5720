use std::collections::{HashMap, HashSet};

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use estate_core::sea_ext::ilike_contains;
use estate_domain::activity::{DocumentStatus, NotificationKind};
use estate_domain::pagination::{Page, PageRequest, Sort};
use estate_domain::property::{Amenity, Coordinates, PropertySortBy};
use estate_domain::user::{Preferences, UserRole};
use estate_marketplace_schema::{
    notifications, properties, property_favorites, property_images, property_reviews, users,
    verification_documents,
};

use crate::domain::repository::{
    FavoriteRepository, NotificationRepository, PropertyRepository, ReviewRepository,
    UserRepository, VerificationRepository,
};
use crate::domain::types::{
    FavoriteState, NewReview, Notification, Property, PropertyChanges, PropertyDetail,
    PropertyFilter, PropertyImage, PropertyListing, RatingSummary, Review, User, UserRef,
    VerificationDocument, VirtualTour,
};
use crate::error::MarketplaceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketplaceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn create(&self, user: &User) -> Result<(), MarketplaceError> {
        let preferences =
            serde_json::to_value(&user.preferences).context("encode user preferences")?;
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(i16::from(user.role.as_u8())),
            email_verified: Set(user.email_verified),
            phone_verified: Set(user.phone_verified),
            identity_verified: Set(user.identity_verified),
            preferences: Set(preferences),
            reward_points: Set(user.reward_points),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(MarketplaceError::EmailAlreadyInUse),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_preferences(
        &self,
        id: Uuid,
        preferences: &Preferences,
    ) -> Result<(), MarketplaceError> {
        let value = serde_json::to_value(preferences).context("encode user preferences")?;
        users::ActiveModel {
            id: Set(id),
            preferences: Set(value),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user preferences")?;
        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .ok_or_else(|| anyhow!("unknown user role {}", model.role))?;
    let preferences: Preferences =
        serde_json::from_value(model.preferences).context("decode user preferences")?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role,
        email_verified: model.email_verified,
        phone_verified: model.phone_verified,
        identity_verified: model.identity_verified,
        preferences,
        reward_points: model.reward_points,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Property repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPropertyRepository {
    pub db: DatabaseConnection,
}

/// Room counts are stored as `INTEGER`; a count past `i32::MAX` matches nothing.
fn room_count_eq(column: properties::Column, n: u32) -> SimpleExpr {
    match i32::try_from(n) {
        Ok(n) => column.eq(n),
        Err(_) => Expr::value(false),
    }
}

fn room_count(n: u32) -> anyhow::Result<i32> {
    i32::try_from(n).context("room count out of range")
}

fn filter_condition(filter: &PropertyFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(search) = filter.search.as_deref() {
        cond = cond.add(
            Condition::any()
                .add(ilike_contains(properties::Column::Title, search))
                .add(ilike_contains(properties::Column::Description, search))
                .add(ilike_contains(properties::Column::Location, search)),
        );
    }
    if let Some(kind) = filter.property_type {
        cond = cond.add(properties::Column::PropertyType.eq(kind.as_str()));
    }
    if let Some(min) = filter.min_price {
        cond = cond.add(properties::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        cond = cond.add(properties::Column::Price.lte(max));
    }
    if let Some(n) = filter.bedrooms {
        cond = cond.add(room_count_eq(properties::Column::Bedrooms, n));
    }
    if let Some(n) = filter.bathrooms {
        cond = cond.add(room_count_eq(properties::Column::Bathrooms, n));
    }
    if let Some(furnished) = filter.furnished {
        cond = cond.add(properties::Column::Furnished.eq(furnished.as_str()));
    }
    cond
}

/// Filtered, ordered page of properties. Ties on the sort column fall back
/// to id in the same direction so pages stay stable.
fn page_query(filter: &PropertyFilter, page: PageRequest) -> Select<properties::Entity> {
    let (column, sort) = match filter.sort_by {
        PropertySortBy::Price(sort) => (properties::Column::Price, sort),
        PropertySortBy::CreatedAt(sort) => (properties::Column::CreatedAt, sort),
    };
    let query = properties::Entity::find().filter(filter_condition(filter));
    let query = match sort {
        Sort::Asc => query
            .order_by_asc(column)
            .order_by_asc(properties::Column::Id),
        Sort::Desc => query
            .order_by_desc(column)
            .order_by_desc(properties::Column::Id),
    };
    query.offset(page.offset()).limit(u64::from(page.limit))
}

impl PropertyRepository for DbPropertyRepository {
    async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<Page<PropertyListing>, MarketplaceError> {
        let page = page.clamped();
        let total = properties::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .context("count properties")?;

        let rows = page_query(filter, page)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list properties")?;

        let items = listings_from_rows(&self.db, rows).await?;
        Ok(Page::new(items, total, page))
    }

    async fn find_listing(&self, id: Uuid) -> Result<Option<PropertyListing>, MarketplaceError> {
        let row = properties::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find property")?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut listings = listings_from_rows(&self.db, vec![row]).await?;
        Ok(listings.pop())
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PropertyDetail>, MarketplaceError> {
        let Some(listing) = self.find_listing(id).await? else {
            return Ok(None);
        };
        let rows = property_reviews::Entity::find()
            .filter(property_reviews::Column::PropertyId.eq(id))
            .find_also_related(users::Entity)
            .order_by_asc(property_reviews::Column::CreatedAt)
            .order_by_asc(property_reviews::Column::Id)
            .all(&self.db)
            .await
            .context("list property reviews")?;
        let reviews = rows
            .into_iter()
            .map(|(review, author)| Review {
                id: review.id,
                property_id: review.property_id,
                user: author
                    .map(|u| UserRef {
                        id: u.id,
                        name: u.name,
                    })
                    .unwrap_or(UserRef {
                        id: review.user_id,
                        name: String::new(),
                    }),
                rating: review.rating,
                comment: review.comment,
                created_at: review.created_at,
            })
            .collect();
        Ok(Some(PropertyDetail { listing, reviews }))
    }

    async fn create(
        &self,
        property: &Property,
        images: &[PropertyImage],
    ) -> Result<(), MarketplaceError> {
        let model = property_active_model(property)?;
        let images = image_models(property.id, 0, images, property.created_at);
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    model.insert(txn).await?;
                    if !images.is_empty() {
                        property_images::Entity::insert_many(images)
                            .exec_without_returning(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create property")?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &PropertyChanges,
        new_images: &[PropertyImage],
    ) -> Result<(), MarketplaceError> {
        let now = Utc::now();
        let mut am = properties::ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(v) = &changes.title {
            am.title = Set(v.clone());
        }
        if let Some(v) = changes.price {
            am.price = Set(v);
        }
        if let Some(v) = &changes.location {
            am.location = Set(v.clone());
        }
        if let Some(coordinates) = changes.coordinates {
            am.latitude = Set(coordinates.map(|c| c.latitude));
            am.longitude = Set(coordinates.map(|c| c.longitude));
        }
        if let Some(v) = &changes.description {
            am.description = Set(v.clone());
        }
        if let Some(v) = changes.property_type {
            am.property_type = Set(v.as_str().to_owned());
        }
        if let Some(v) = changes.size {
            am.size = Set(v);
        }
        if let Some(v) = changes.bedrooms {
            am.bedrooms = Set(Some(room_count(v)?));
        }
        if let Some(v) = changes.bathrooms {
            am.bathrooms = Set(Some(room_count(v)?));
        }
        if let Some(v) = &changes.amenities {
            am.amenities = Set(serde_json::to_value(v).context("encode amenities")?);
        }
        if let Some(v) = changes.furnished {
            am.furnished = Set(Some(v.as_str().to_owned()));
        }
        if let Some(v) = changes.featured {
            am.featured = Set(v);
        }
        let new_images = new_images.to_vec();

        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    am.update(txn).await?;
                    if !new_images.is_empty() {
                        let existing = property_images::Entity::find()
                            .filter(property_images::Column::PropertyId.eq(id))
                            .count(txn)
                            .await?;
                        let models = image_models(id, existing as i32, &new_images, now);
                        property_images::Entity::insert_many(models)
                            .exec_without_returning(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update property")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, MarketplaceError> {
        let result = properties::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete property")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_virtual_tour(
        &self,
        id: Uuid,
        tour: &VirtualTour,
    ) -> Result<(), MarketplaceError> {
        properties::ActiveModel {
            id: Set(id),
            virtual_tour_url: Set(Some(tour.url.clone())),
            virtual_tour_provider: Set(tour.provider.clone()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set virtual tour")?;
        Ok(())
    }
}

fn property_active_model(property: &Property) -> anyhow::Result<properties::ActiveModel> {
    Ok(properties::ActiveModel {
        id: Set(property.id),
        owner_id: Set(property.owner_id),
        title: Set(property.title.clone()),
        price: Set(property.price),
        location: Set(property.location.clone()),
        latitude: Set(property.coordinates.map(|c| c.latitude)),
        longitude: Set(property.coordinates.map(|c| c.longitude)),
        description: Set(property.description.clone()),
        property_type: Set(property.property_type.as_str().to_owned()),
        size: Set(property.size),
        bedrooms: Set(property.bedrooms.map(room_count).transpose()?),
        bathrooms: Set(property.bathrooms.map(room_count).transpose()?),
        amenities: Set(serde_json::to_value(&property.amenities).context("encode amenities")?),
        furnished: Set(property.furnished.map(|f| f.as_str().to_owned())),
        featured: Set(property.featured),
        favorites_count: Set(property.favorites_count as i32),
        virtual_tour_url: Set(property.virtual_tour.as_ref().map(|t| t.url.clone())),
        virtual_tour_provider: Set(property.virtual_tour.as_ref().and_then(|t| t.provider.clone())),
        rating_overall: Set(property.rating_overall),
        rating_count: Set(property.rating_count as i32),
        created_at: Set(property.created_at),
        updated_at: Set(property.updated_at),
    })
}

fn image_models(
    property_id: Uuid,
    first_position: i32,
    images: &[PropertyImage],
    created_at: chrono::DateTime<Utc>,
) -> Vec<property_images::ActiveModel> {
    images
        .iter()
        .enumerate()
        .map(|(i, image)| property_images::ActiveModel {
            id: Set(Uuid::now_v7()),
            property_id: Set(property_id),
            position: Set(first_position + i as i32),
            url: Set(image.url.clone()),
            public_id: Set(image.public_id.clone()),
            created_at: Set(created_at),
        })
        .collect()
}

fn property_from_model(model: properties::Model) -> anyhow::Result<Property> {
    let property_type = model
        .property_type
        .parse()
        .with_context(|| format!("decode property type of {}", model.id))?;
    let furnished = model
        .furnished
        .as_deref()
        .map(str::parse)
        .transpose()
        .with_context(|| format!("decode furnished of {}", model.id))?;
    let amenities: Vec<Amenity> =
        serde_json::from_value(model.amenities).context("decode amenities")?;
    let coordinates = match (model.latitude, model.longitude) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng).ok(),
        _ => None,
    };
    let virtual_tour = model.virtual_tour_url.map(|url| VirtualTour {
        url,
        provider: model.virtual_tour_provider,
    });
    Ok(Property {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        price: model.price,
        location: model.location,
        coordinates,
        description: model.description,
        property_type,
        size: model.size,
        bedrooms: model.bedrooms.map(|n| n.max(0) as u32),
        bathrooms: model.bathrooms.map(|n| n.max(0) as u32),
        amenities,
        furnished,
        featured: model.featured,
        favorites_count: model.favorites_count.max(0) as u32,
        virtual_tour,
        rating_overall: model.rating_overall,
        rating_count: model.rating_count.max(0) as u32,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Resolve images for a batch of `(property, owner)` rows, keeping row order.
async fn listings_from_rows<C>(
    db: &C,
    rows: Vec<(properties::Model, Option<users::Model>)>,
) -> Result<Vec<PropertyListing>, MarketplaceError>
where
    C: sea_orm::ConnectionTrait,
{
    if rows.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<Uuid> = rows.iter().map(|(p, _)| p.id).collect();
    let image_rows = property_images::Entity::find()
        .filter(property_images::Column::PropertyId.is_in(ids))
        .order_by_asc(property_images::Column::PropertyId)
        .order_by_asc(property_images::Column::Position)
        .all(db)
        .await
        .context("list property images")?;
    let mut images: HashMap<Uuid, Vec<PropertyImage>> = HashMap::new();
    for row in image_rows {
        images.entry(row.property_id).or_default().push(PropertyImage {
            url: row.url,
            public_id: row.public_id,
        });
    }

    let mut listings = Vec::with_capacity(rows.len());
    for (model, owner) in rows {
        let owner = owner.ok_or_else(|| anyhow!("owner of property {} missing", model.id))?;
        let images = images.remove(&model.id).unwrap_or_default();
        listings.push(PropertyListing {
            property: property_from_model(model)?,
            owner: UserRef {
                id: owner.id,
                name: owner.name,
            },
            images,
        });
    }
    Ok(listings)
}

/// `SELECT … FOR UPDATE` on the property row; `None` if it does not exist.
async fn lock_property(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<Option<properties::Model>, DbErr> {
    properties::Entity::find_by_id(id)
        .lock_exclusive()
        .one(txn)
        .await
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn toggle(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<FavoriteState>, MarketplaceError> {
        let state = self
            .db
            .transaction::<_, Option<FavoriteState>, DbErr>(|txn| {
                Box::pin(async move {
                    if lock_property(txn, property_id).await?.is_none() {
                        return Ok(None);
                    }

                    let removed = property_favorites::Entity::delete_many()
                        .filter(property_favorites::Column::UserId.eq(user_id))
                        .filter(property_favorites::Column::PropertyId.eq(property_id))
                        .exec(txn)
                        .await?
                        .rows_affected;
                    if removed == 0 {
                        property_favorites::ActiveModel {
                            user_id: Set(user_id),
                            property_id: Set(property_id),
                            created_at: Set(Utc::now()),
                        }
                        .insert(txn)
                        .await?;
                    }

                    let count = property_favorites::Entity::find()
                        .filter(property_favorites::Column::PropertyId.eq(property_id))
                        .count(txn)
                        .await?;
                    properties::Entity::update_many()
                        .col_expr(
                            properties::Column::FavoritesCount,
                            Expr::value(count as i32),
                        )
                        .filter(properties::Column::Id.eq(property_id))
                        .exec(txn)
                        .await?;

                    Ok(Some(FavoriteState {
                        is_favorited: removed == 0,
                        favorites_count: count as u32,
                    }))
                })
            })
            .await
            .context("toggle favorite")?;
        Ok(state)
    }

    async fn favorited_among(
        &self,
        user_id: Uuid,
        property_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, MarketplaceError> {
        if property_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows = property_favorites::Entity::find()
            .filter(property_favorites::Column::UserId.eq(user_id))
            .filter(property_favorites::Column::PropertyId.is_in(property_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("list favorited properties among ids")?;
        Ok(rows.into_iter().map(|r| r.property_id).collect())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PropertyListing>, MarketplaceError> {
        let favorites = property_favorites::Entity::find()
            .filter(property_favorites::Column::UserId.eq(user_id))
            .order_by_desc(property_favorites::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list user favorites")?;
        if favorites.is_empty() {
            return Ok(vec![]);
        }
        let order: Vec<Uuid> = favorites.iter().map(|f| f.property_id).collect();

        let rows = properties::Entity::find()
            .filter(properties::Column::Id.is_in(order.iter().copied()))
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("load favorite properties")?;
        let mut by_id: HashMap<Uuid, PropertyListing> = listings_from_rows(&self.db, rows)
            .await?
            .into_iter()
            .map(|l| (l.property.id, l))
            .collect();
        Ok(order.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn add(&self, review: &NewReview) -> Result<Option<RatingSummary>, MarketplaceError> {
        let review = review.clone();
        let summary = self
            .db
            .transaction::<_, Option<RatingSummary>, DbErr>(|txn| {
                Box::pin(async move {
                    if lock_property(txn, review.property_id).await?.is_none() {
                        return Ok(None);
                    }

                    property_reviews::ActiveModel {
                        id: Set(review.id),
                        property_id: Set(review.property_id),
                        user_id: Set(review.user_id),
                        rating: Set(review.rating),
                        comment: Set(review.comment.clone()),
                        created_at: Set(review.created_at),
                    }
                    .insert(txn)
                    .await?;

                    let (overall, count) = property_reviews::Entity::find()
                        .select_only()
                        .column_as(
                            SimpleExpr::from(Func::avg(Expr::col(
                                property_reviews::Column::Rating,
                            ))),
                            "overall",
                        )
                        .column_as(
                            SimpleExpr::from(Func::count(Expr::col(
                                property_reviews::Column::Id,
                            ))),
                            "count",
                        )
                        .filter(property_reviews::Column::PropertyId.eq(review.property_id))
                        .into_tuple::<(Option<f64>, i64)>()
                        .one(txn)
                        .await?
                        .unwrap_or((None, 0));
                    let summary = RatingSummary {
                        overall: overall.unwrap_or(0.0),
                        count: count as u32,
                    };

                    properties::Entity::update_many()
                        .col_expr(
                            properties::Column::RatingOverall,
                            Expr::value(summary.overall),
                        )
                        .col_expr(
                            properties::Column::RatingCount,
                            Expr::value(summary.count as i32),
                        )
                        .filter(properties::Column::Id.eq(review.property_id))
                        .exec(txn)
                        .await?;

                    Ok(Some(summary))
                })
            })
            .await
            .context("add review")?;
        Ok(summary)
    }
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

impl NotificationRepository for DbNotificationRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>, MarketplaceError> {
        let models = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .all(&self.db)
            .await
            .context("list notifications")?;
        Ok(models
            .into_iter()
            .map(notification_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn create(&self, notification: &Notification) -> Result<(), MarketplaceError> {
        notifications::ActiveModel {
            id: Set(notification.id),
            user_id: Set(notification.user_id),
            kind: Set(notification.kind.as_str().to_owned()),
            message: Set(notification.message.clone()),
            read: Set(notification.read),
            created_at: Set(notification.created_at),
        }
        .insert(&self.db)
        .await
        .context("create notification")?;
        Ok(())
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Notification>, MarketplaceError> {
        let model = notifications::Entity::find_by_id(id)
            .filter(notifications::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find notification")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        am.read = Set(true);
        let updated = am
            .update(&self.db)
            .await
            .context("mark notification read")?;
        Ok(Some(notification_from_model(updated)?))
    }
}

fn notification_from_model(model: notifications::Model) -> anyhow::Result<Notification> {
    let kind: NotificationKind = model
        .kind
        .parse()
        .with_context(|| format!("decode notification kind of {}", model.id))?;
    Ok(Notification {
        id: model.id,
        user_id: model.user_id,
        kind,
        message: model.message,
        read: model.read,
        created_at: model.created_at,
    })
}

// ── Verification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationRepository {
    pub db: DatabaseConnection,
}

impl VerificationRepository for DbVerificationRepository {
    async fn create(&self, document: &VerificationDocument) -> Result<(), MarketplaceError> {
        verification_documents::ActiveModel {
            id: Set(document.id),
            user_id: Set(document.user_id),
            kind: Set(document.kind.as_str().to_owned()),
            url: Set(document.url.clone()),
            public_id: Set(document.public_id.clone()),
            status: Set(document.status.as_str().to_owned()),
            remarks: Set(document.remarks.clone()),
            created_at: Set(document.created_at),
            updated_at: Set(document.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create verification document")?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<VerificationDocument>, MarketplaceError> {
        let models = verification_documents::Entity::find()
            .filter(verification_documents::Column::UserId.eq(user_id))
            .order_by_asc(verification_documents::Column::CreatedAt)
            .order_by_asc(verification_documents::Column::Id)
            .all(&self.db)
            .await
            .context("list verification documents")?;
        Ok(models
            .into_iter()
            .map(document_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
        remarks: Option<&str>,
    ) -> Result<bool, MarketplaceError> {
        let result = verification_documents::Entity::update_many()
            .col_expr(
                verification_documents::Column::Status,
                Expr::value(status.as_str()),
            )
            .col_expr(
                verification_documents::Column::Remarks,
                Expr::value(remarks.map(str::to_owned)),
            )
            .col_expr(
                verification_documents::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(verification_documents::Column::Id.eq(document_id))
            .filter(verification_documents::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("update verification status")?;
        Ok(result.rows_affected > 0)
    }
}

fn document_from_model(
    model: verification_documents::Model,
) -> anyhow::Result<VerificationDocument> {
    Ok(VerificationDocument {
        id: model.id,
        user_id: model.user_id,
        kind: model
            .kind
            .parse()
            .with_context(|| format!("decode document kind of {}", model.id))?,
        url: model.url,
        public_id: model.public_id,
        status: model
            .status
            .parse()
            .with_context(|| format!("decode document status of {}", model.id))?,
        remarks: model.remarks,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
