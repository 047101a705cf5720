//! Domain types shared across the Estate workspace.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` converts to and from
//! the string columns via `as_str` / `FromStr`.

pub mod activity;
pub mod pagination;
pub mod place;
pub mod property;
pub mod user;
