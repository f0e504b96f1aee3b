//! Application layer: the parking workflow and the capabilities it consumes.
//!
//! # Modules
//!
//! - [`services`] - Fare calculation and the entry/exit orchestration
//! - [`input`] - Operator input capability and registration validation
//! - [`clock`] - Time source injected into the services

pub mod clock;
pub mod input;
pub mod services;
