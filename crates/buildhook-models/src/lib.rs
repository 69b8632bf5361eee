//! Shared models.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod change_record;
mod controller_address;
mod repository_target;
pub mod types;

pub use change_record::ChangeRecord;
pub use controller_address::{ControllerAddress, ControllerAddressError};
pub use repository_target::{RepositoryTarget, RevisionSpec, DEFAULT_BRANCH};
