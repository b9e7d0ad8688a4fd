//! Repository Implementations
//!
//! Concrete implementations of the domain `BranchRepository` trait.
//!
//! - **PgBranchRepository** - PostgreSQL document table with a unique
//!   email index
//! - **InMemoryBranchRepository** - process-local store for tests and
//!   database-less runs
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use branch_service::infrastructure::repositories::PgBranchRepository;
//! use branch_service::shared::snowflake::SnowflakeGenerator;
//!
//! let repo = PgBranchRepository::new(pool.clone(), Arc::new(SnowflakeGenerator::new(1)));
//! ```

pub mod branch_repository;
pub mod memory_repository;

pub use branch_repository::PgBranchRepository;
pub use memory_repository::InMemoryBranchRepository;
