//! Core module.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
pub mod use_cases;
pub mod utils;

pub use errors::{DomainError, Result};
pub use utils::timestamp::normalize_timestamp;
