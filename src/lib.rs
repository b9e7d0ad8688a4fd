//! # Branch Service Library
//!
//! This crate provides a bank branch microservice with:
//! - RESTful HTTP API endpoints for branches and their holiday calendars
//! - PostgreSQL document storage with a unique email index
//! - An in-memory store for tests and database-less runs
//!
//! ## Architecture
//!
//! - **Domain Layer**: Branch aggregate and repository trait
//! - **Application Layer**: Branch service and DTOs
//! - **Infrastructure Layer**: Database, repositories, metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! branch_service/
//! +-- config/         Configuration management
//! +-- domain/         Branch and Holiday entities, repository trait
//! +-- application/    Branch service and DTOs
//! +-- infrastructure/ Database, repositories, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
