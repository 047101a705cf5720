pub mod account;
pub mod auth;
pub mod extract;
pub mod property;
