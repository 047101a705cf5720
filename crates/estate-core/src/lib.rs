//! Ambient plumbing shared by Estate services: configuration loading, the
//! common error envelope, health probes, request ids, tracing setup and a
//! few sea-orm query helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
