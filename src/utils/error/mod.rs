//! Error handling for the resource guard
//!
//! This module defines all error types used throughout the service.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GuardError, Result};
