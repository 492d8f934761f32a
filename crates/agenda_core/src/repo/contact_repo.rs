//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and lookup APIs over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//! - Translate the `phone` unique-constraint failure into a domain
//!   validation error instead of leaking the raw SQLite error.
//!
//! # Invariants
//! - Write paths call `ContactDraft::validate()` before SQL mutations.
//! - `id` and `created_at` are assigned on insert and never updated.
//! - Name substring matching uses Rust case folding, not SQLite `NOCASE`,
//!   so non-ASCII names fold the same way on every platform.

use crate::db::{migrations::latest_version, DbError};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    notes,
    created_at
FROM contacts";

const CONTACT_COLUMNS: &[&str] = &["id", "name", "email", "phone", "notes", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Field constraint or phone-uniqueness violation.
    Validation(ContactValidationError),
    /// Storage transport failure, fatal to the current request.
    Db(DbError),
    /// Write targeted an id that does not exist.
    NotFound(ContactId),
    /// Persisted state does not satisfy model invariants.
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{column}` in table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD and lookup operations.
///
/// The service layer treats this as a durable store keyed by id, with one
/// unique secondary index (`phone`) and one non-unique text index (`name`).
pub trait ContactRepository {
    /// Inserts one contact, assigning `id` and `created_at`, and returns
    /// the persisted row.
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact>;
    /// Overwrites `name`, `email`, `phone` and `notes` of an existing row.
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()>;
    /// Gets one contact by primary key.
    fn find_by_id(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Gets the single contact with an exact phone match.
    fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Contact>>;
    /// Lists contacts whose name contains `needle`, case-insensitively.
    fn find_by_name_contains(&self, needle: &str) -> RepoResult<Vec<Contact>>;
    /// Returns whether a contact with the given id exists.
    fn exists_by_id(&self, id: ContactId) -> RepoResult<bool>;
    /// Removes one contact by id. Deleting a missing id is not an error;
    /// callers check existence explicitly when they need the distinction.
    fn delete_by_id(&self, id: ContactId) -> RepoResult<()>;
    /// Lists all contacts ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository after verifying the connection is migrated
    /// and carries the expected `contacts` schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO contacts (name, email, phone, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, (strftime('%s', 'now') * 1000));",
                params![
                    draft.name.as_str(),
                    draft.email.as_deref(),
                    draft.phone.as_str(),
                    draft.notes.as_deref(),
                ],
            )
            .map_err(|err| translate_phone_conflict(err, draft.phone.as_str()))?;

        let id = self.conn.last_insert_rowid();
        self.find_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted contact {id} missing on read-back"))
        })
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        draft.validate()?;

        // `created_at` is deliberately absent from the SET list.
        let changed = self
            .conn
            .execute(
                "UPDATE contacts
                 SET
                    name = ?2,
                    email = ?3,
                    phone = ?4,
                    notes = ?5
                 WHERE id = ?1;",
                params![
                    id,
                    draft.name.as_str(),
                    draft.email.as_deref(),
                    draft.phone.as_str(),
                    draft.notes.as_deref(),
                ],
            )
            .map_err(|err| translate_phone_conflict(err, draft.phone.as_str()))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_by_id(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE phone = ?1;"))?;

        let mut rows = stmt.query([phone])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name_contains(&self, needle: &str) -> RepoResult<Vec<Contact>> {
        // SQLite LIKE/NOCASE only folds ASCII. Folding in Rust keeps
        // "joão" matching "João Silva" on every platform.
        let folded_needle = needle.to_lowercase();

        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            let contact = parse_contact_row(row)?;
            if contact.name.to_lowercase().contains(&folded_needle) {
                contacts.push(contact);
            }
        }

        Ok(contacts)
    }

    fn exists_by_id(&self, id: ContactId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM contacts WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_by_id(&self, id: ContactId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM contacts WHERE id = ?1;", params![id])?;
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }
}

/// Maps the `contacts.phone` unique-constraint failure to a validation
/// error; everything else stays a transport error.
fn translate_phone_conflict(err: rusqlite::Error, phone: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            return RepoError::Validation(ContactValidationError::PhoneTaken(phone.to_string()));
        }
    }
    err.into()
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let contact = Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };

    if contact.phone.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "contact {} has an empty phone in contacts.phone",
            contact.id
        )));
    }

    Ok(contact)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "contacts")? {
        return Err(RepoError::MissingRequiredTable("contacts"));
    }

    for column in CONTACT_COLUMNS.iter().copied() {
        if !table_has_column(conn, "contacts", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "contacts",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
