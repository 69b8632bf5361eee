//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod health;
mod metrics;
pub mod server;
pub mod utils;
#[cfg(test)]
mod testing;
mod webhook;

pub use errors::{Result, ServerError};
pub use server::{build_actix_app, run_server, AppContext};
