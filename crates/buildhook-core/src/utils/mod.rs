//! Utilities.

pub mod timestamp;
