//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the create/list/get/search/update/delete entry points.
//! - Translate record absence into typed not-found errors.
//!
//! # Invariants
//! - `create` never pre-checks phone uniqueness; it relies on the store
//!   constraint and translates the resulting conflict.
//! - `update` replaces all four mutable fields and preserves `created_at`.
//! - An empty name search is an error; an empty `find_all` is a success.
//!   The asymmetry is part of the caller contract.

use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for contact use-cases.
///
/// The three not-found variants and `Validation` are the domain surface;
/// boundaries map them to "not found" and "bad input" responses. `Repo`
/// carries infrastructure failures that are fatal to the request.
#[derive(Debug)]
pub enum ContactServiceError {
    /// No contact with the given id exists.
    ContactNotFound(ContactId),
    /// No contact with the given phone exists.
    PhoneNotFound(String),
    /// No contact name contains the given substring.
    NoNameMatches(String),
    /// Field constraint or phone-uniqueness violation.
    Validation(ContactValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ContactServiceError {
    /// Returns whether this error maps to a "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContactNotFound(_) | Self::PhoneNotFound(_) | Self::NoNameMatches(_)
        )
    }
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::PhoneNotFound(phone) => write!(f, "no contact with phone `{phone}`"),
            Self::NoNameMatches(needle) => write!(f, "no contact name contains `{needle}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent contact state: {details}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ContactNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ContactServiceError>;

/// Contact service facade over repository implementations.
///
/// Holds the repository injected at construction; every operation is one
/// bounded round trip to the store with no shared mutable state.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one contact and returns the persisted row with its
    /// store-assigned id and creation timestamp.
    pub fn create(&self, draft: &ContactDraft) -> ServiceResult<Contact> {
        Ok(self.repo.create_contact(draft)?)
    }

    /// Lists every contact. An empty book is a valid empty response.
    pub fn find_all(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one contact by id.
    pub fn find_by_id(&self, id: ContactId) -> ServiceResult<Contact> {
        self.repo
            .find_by_id(id)?
            .ok_or(ContactServiceError::ContactNotFound(id))
    }

    /// Lists contacts whose name contains `needle`, case-insensitively.
    ///
    /// # Contract
    /// - Unlike `find_all`, an empty match is an error.
    pub fn find_by_name(&self, needle: &str) -> ServiceResult<Vec<Contact>> {
        let contacts = self.repo.find_by_name_contains(needle)?;
        if contacts.is_empty() {
            return Err(ContactServiceError::NoNameMatches(needle.to_string()));
        }
        Ok(contacts)
    }

    /// Gets the single contact with an exact phone match.
    ///
    /// At most one row can match given the uniqueness invariant.
    pub fn find_by_phone(&self, phone: &str) -> ServiceResult<Contact> {
        self.repo
            .find_by_phone(phone)?
            .ok_or_else(|| ContactServiceError::PhoneNotFound(phone.to_string()))
    }

    /// Replaces the four mutable fields of an existing contact.
    ///
    /// # Contract
    /// - No partial updates: callers supply the full desired state.
    /// - `id` and `created_at` are never touched.
    pub fn update(&self, id: ContactId, draft: &ContactDraft) -> ServiceResult<Contact> {
        self.repo
            .find_by_id(id)?
            .ok_or(ContactServiceError::ContactNotFound(id))?;

        self.repo.update_contact(id, draft)?;
        self.repo
            .find_by_id(id)?
            .ok_or(ContactServiceError::InconsistentState(
                "updated contact missing on read-back",
            ))
    }

    /// Removes one contact by id.
    ///
    /// Existence is checked explicitly before the delete, so deleting an
    /// unknown id fails without mutating the store.
    pub fn delete(&self, id: ContactId) -> ServiceResult<()> {
        if !self.repo.exists_by_id(id)? {
            return Err(ContactServiceError::ContactNotFound(id));
        }
        self.repo.delete_by_id(id)?;
        Ok(())
    }
}
