//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **BranchService**: branch lifecycle and holiday calendar management

pub mod branch_service;

pub use branch_service::{BranchError, BranchService, BranchServiceImpl, CreateBranchDto};
