//! Use cases.

pub mod changes;
