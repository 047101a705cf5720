pub mod notifications;
pub mod properties;
pub mod property_favorites;
pub mod property_images;
pub mod property_reviews;
pub mod users;
pub mod verification_documents;
