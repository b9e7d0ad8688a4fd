//! # Domain Layer
//!
//! The core branch model, independent of HTTP and storage concerns.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate holiday calendar behavior

pub mod entities;

pub use entities::*;
