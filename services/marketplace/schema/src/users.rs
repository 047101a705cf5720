use sea_orm::entity::prelude::*;

/// Marketplace account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: i16,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub identity_verified: bool,
    /// Saved search preferences, camelCase JSON.
    pub preferences: Json,
    pub reward_points: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::properties::Entity")]
    Properties,
    #[sea_orm(has_many = "super::property_favorites::Entity")]
    PropertyFavorites,
    #[sea_orm(has_many = "super::property_reviews::Entity")]
    PropertyReviews,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
    #[sea_orm(has_many = "super::verification_documents::Entity")]
    VerificationDocuments,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Properties.def()
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

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl Related<super::verification_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationDocuments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
