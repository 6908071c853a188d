//! Consumer-facing state containers.

pub mod project_store;
