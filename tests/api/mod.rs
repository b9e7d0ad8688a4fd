//! REST API endpoint tests

mod branch_tests;
mod health_tests;
mod holiday_tests;
