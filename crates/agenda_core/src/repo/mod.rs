//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the contact data-access contract used by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `ContactDraft::validate()` before SQL
//!   mutations.
//! - Repository APIs return semantic errors (`NotFound`, translated phone
//!   conflicts) in addition to DB transport errors.

pub mod contact_repo;
