//! Domain model for portfolio projects.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the default seed collection.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod project;
pub mod seed;
