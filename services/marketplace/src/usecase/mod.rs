pub mod account;
pub mod auth;
pub mod favorite;
pub mod media;
pub mod nearby;
pub mod property;
pub mod rating;
