//! Change intake.

mod dispatch_changes;
mod extract_changes;

pub use dispatch_changes::{dispatch_changes, DispatchTarget};
pub use extract_changes::{extract_changes, extract_branch_name, is_deleted_revision};
