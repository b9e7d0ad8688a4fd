//! # Domain Entities
//!
//! - **Branch**: a bank office with contact details, a status label, and
//!   an embedded holiday calendar
//! - **Holiday**: a named calendar date owned by exactly one branch
//!
//! The repository trait lives next to the entity it persists and is
//! implemented in the infrastructure layer.

mod branch;

pub use branch::{now_timestamp, Branch, BranchRepository, Holiday};
