//! # Unit Components
//!
//! Organizes the unit tests by crate module.


/// Unit tests for configuration defaults, tiers and validation.
pub mod config;

/// Unit tests for the replacement policies and their components.
pub mod policies;

/// Unit tests for the statistics snapshot.
pub mod stats;
