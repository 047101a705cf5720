pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_properties;
mod m20261001_000003_create_property_images;
mod m20261001_000004_create_property_favorites;
mod m20261001_000005_create_property_reviews;
mod m20261001_000006_create_notifications;
mod m20261001_000007_create_verification_documents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_properties::Migration),
            Box::new(m20261001_000003_create_property_images::Migration),
            Box::new(m20261001_000004_create_property_favorites::Migration),
            Box::new(m20261001_000005_create_property_reviews::Migration),
            Box::new(m20261001_000006_create_notifications::Migration),
            Box::new(m20261001_000007_create_verification_documents::Migration),
        ]
    }
}
