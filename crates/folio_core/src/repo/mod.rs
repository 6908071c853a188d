//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define whole-collection data access contracts.
//! - Isolate file format details from service orchestration.
//!
//! # Invariants
//! - Repositories report transport errors; semantic errors (`NotFound`) are
//!   decided by the service layer.

pub mod project_repo;
