//! Domain model for the contact book.
//!
//! # Responsibility
//! - Define the canonical persisted contact record and its input draft.
//! - Own field-level validation applied before any write reaches storage.
//!
//! # Invariants
//! - Every persisted contact is identified by a store-assigned `ContactId`.
//! - Phone uniqueness is enforced by storage, not by the model.

pub mod contact;
