//! Core admission control

pub mod admission;
