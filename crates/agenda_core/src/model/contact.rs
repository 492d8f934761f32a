//! Contact record and draft validation.
//!
//! # Responsibility
//! - Define the persisted `Contact` shape and the caller-supplied draft.
//! - Validate field constraints before persistence.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by storage on first insert and are
//!   never modified afterwards.
//! - `name` length stays within [`NAME_MIN_CHARS`, `NAME_MAX_CHARS`].
//! - `phone` is required; cross-record uniqueness belongs to storage.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by storage when a contact is first inserted.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = i64;

/// Minimum accepted `name` length in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum accepted `name` length in characters.
pub const NAME_MAX_CHARS: usize = 30;

/// Persisted address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned primary key.
    pub id: ContactId,
    /// Display name, 2..=30 characters.
    pub name: String,
    /// Optional email address. No format constraint is enforced here.
    pub email: Option<String>,
    /// Required phone number, unique across all contacts.
    pub phone: String,
    /// Optional free-form notes, unbounded length.
    pub notes: Option<String>,
    /// Unix epoch milliseconds, set exactly once at insert.
    pub created_at: i64,
}

/// Caller-supplied contact state used by create and update.
///
/// Carries no identity and no timestamp; both are storage concerns.
/// Update uses full-replacement semantics, so every mutable field appears
/// here even when optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ContactDraft {
    /// Creates a draft with the two required fields set.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            notes: None,
        }
    }

    /// Checks field constraints and returns the first violation found.
    ///
    /// # Contract
    /// - `name` must be 2..=30 characters (Unicode scalar count).
    /// - `phone` must contain at least one non-whitespace character.
    /// - `email` and `notes` are unconstrained.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let name_chars = self.name.chars().count();
        if name_chars < NAME_MIN_CHARS || name_chars > NAME_MAX_CHARS {
            return Err(ContactValidationError::NameLength { chars: name_chars });
        }

        if self.phone.trim().is_empty() {
            return Err(ContactValidationError::PhoneMissing);
        }

        Ok(())
    }
}

/// Constraint violation raised on a write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name` length is outside the accepted range.
    NameLength { chars: usize },
    /// `phone` is empty or whitespace-only.
    PhoneMissing,
    /// `phone` is already used by another persisted contact.
    ///
    /// Produced by the storage layer when the unique constraint fires; the
    /// write path never pre-checks uniqueness.
    PhoneTaken(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameLength { chars } => write!(
                f,
                "name must be {NAME_MIN_CHARS}..={NAME_MAX_CHARS} characters, got {chars}"
            ),
            Self::PhoneMissing => write!(f, "phone is required"),
            Self::PhoneTaken(phone) => write!(f, "phone `{phone}` is already in use"),
        }
    }
}

impl Error for ContactValidationError {}
