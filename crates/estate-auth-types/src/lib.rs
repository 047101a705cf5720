//! Bearer-token auth shared across Estate services.
//!
//! Provides JWT issuing/validation and the `Identity` extractors.

pub mod identity;
pub mod token;
