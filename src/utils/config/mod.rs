//! Configuration helpers

pub mod utils;

pub use utils::ConfigUtils;
