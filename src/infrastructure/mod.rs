//! Infrastructure layer for external integrations.
//!
//! This layer implements the capabilities consumed by the application layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process repository implementations
//! - [`console`] - Terminal input through `dialoguer`

pub mod console;
pub mod memory;
pub mod persistence;
