//! Build controller channel interface.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod credentials;
mod errors;
mod interface;

pub use credentials::Credentials;
pub use errors::DispatchError;
#[cfg(any(test, feature = "testkit"))]
pub use interface::{MockControllerConnection, MockControllerService};
pub use interface::{ControllerConnection, ControllerService};
