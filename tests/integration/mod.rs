//! Integration tests for resource-guard
//!
//! These tests drive real components over in-memory backends, through the
//! public API and through the assembled actix application.

pub mod admission_tests;
pub mod config_validation_tests;
pub mod error_handling_tests;
pub mod guard_tests;
pub mod http_tests;
pub mod reporting_tests;
