//! Common utilities and types used throughout the replacement engine.
//!
//! This module provides the building blocks shared by every policy component. It includes:
//! 1. **Address Types:** Strong types for physical and block addresses with ReD field extraction.
//! 2. **Constants:** Table geometry, counter bounds and sampling intervals.
//! 3. **Saturating Counters:** Clamped increment/decrement helpers.
//! 4. **Memory Access:** Request types and the access record passed to policies.
//! 5. **Error Handling:** The crate error type.

/// Address type definitions (physical and block addresses).
pub mod addr;

/// Common constants used throughout the engine.
pub mod constants;

/// Saturating counter utility.
pub mod counter;

/// Request type and access record definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{BlockAddr, PhysAddr};
pub use counter::SatCounter;
pub use data::{Access, AccessType};
pub use error::PolicyError;
