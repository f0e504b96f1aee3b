//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Spots, tickets and vehicle categories
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure. Repository traits are
//! implemented in [`crate::infrastructure`] and consumed by
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
