use sea_orm::entity::prelude::*;

/// Property listing. `favorites_count` and the rating columns are
/// denormalized aggregates of `property_favorites` / `property_reviews`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub price: f64,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub property_type: String,
    pub size: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    /// JSON array of amenity names.
    pub amenities: Json,
    pub furnished: Option<String>,
    pub featured: bool,
    pub favorites_count: i32,
    pub virtual_tour_url: Option<String>,
    pub virtual_tour_provider: Option<String>,
    pub rating_overall: f64,
    pub rating_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::property_images::Entity")]
    PropertyImages,
    #[sea_orm(has_many = "super::property_favorites::Entity")]
    PropertyFavorites,
    #[sea_orm(has_many = "super::property_reviews::Entity")]
    PropertyReviews,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::property_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyImages.def()
    }
}

impl Related<super::property_favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyFavorites.def()
    }
}

impl Related<super::property_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyReviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
