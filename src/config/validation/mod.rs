//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `guard_validators`: validators for every configuration section
//! - `tests`: Test suite for all validators

mod guard_validators;
mod trait_def;

pub use trait_def::Validate;
