//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete over the `contact` table.
//! - Classify failures as `NotFound` or `Query`.
//!
//! # Invariants
//! - The repository holds only a borrowed handle; no data survives a call.
//! - Update and delete detect missing rows through the affected-row count.
//! - Log lines carry identifiers and counts only, never field values.

use crate::model::contact::{Contact, ContactId};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT id, name, email, phone FROM contact";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by contact repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// A statement failed to execute or a row could not be decoded.
    Query {
        context: &'static str,
        source: rusqlite::Error,
    },
    /// No row has the requested identifier.
    NotFound(ContactId),
}

impl RepoError {
    fn query(context: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Query { context, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query { context, source } => write!(f, "error {context}: {source}"),
            Self::NotFound(id) => write!(f, "contact not found with ID {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query { source, .. } => Some(source),
            Self::NotFound(_) => None,
        }
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Returns every stored contact in store order.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Returns the contact with the given identifier.
    fn get_contact(&self, id: ContactId) -> RepoResult<Contact>;
    /// Inserts a contact and returns the identifier the store assigned.
    /// The identifier on `contact` is ignored.
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Replaces name/email/phone of the row selected by `contact.id`.
    fn update_contact(&self, contact: &Contact) -> RepoResult<Contact>;
    /// Deletes a contact and returns the deleted identifier.
    fn delete_contact(&self, id: ContactId) -> RepoResult<ContactId>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL};"))
            .map_err(RepoError::query("executing query"))?;
        let mut rows = stmt
            .query([])
            .map_err(RepoError::query("executing query"))?;

        let mut contacts = Vec::new();
        while let Some(row) = rows.next().map_err(RepoError::query("iterating rows"))? {
            contacts.push(parse_contact_row(row).map_err(RepoError::query("scanning row"))?);
        }

        debug!(
            "event=contact_list module=repo status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Contact> {
        let contact = self
            .conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
                params![id],
                parse_contact_row,
            )
            .optional()
            .map_err(RepoError::query("retrieving contact"))?;

        match contact {
            Some(contact) => {
                debug!("event=contact_get module=repo status=ok id={id}");
                Ok(contact)
            }
            None => {
                debug!("event=contact_get module=repo status=not_found id={id}");
                Err(RepoError::NotFound(id))
            }
        }
    }

    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        self.conn
            .execute(
                "INSERT INTO contact (name, email, phone) VALUES (?1, ?2, ?3);",
                params![
                    contact.name.as_str(),
                    contact.email.as_str(),
                    contact.phone.as_str(),
                ],
            )
            .map_err(RepoError::query("executing insert"))?;

        let id = self.conn.last_insert_rowid();
        debug!("event=contact_create module=repo status=ok id={id}");
        Ok(id)
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<Contact> {
        let changed = self
            .conn
            .execute(
                "UPDATE contact
                 SET
                    name = ?1,
                    email = ?2,
                    phone = ?3
                 WHERE id = ?4;",
                params![
                    contact.name.as_str(),
                    contact.email.as_str(),
                    contact.phone.as_str(),
                    contact.id,
                ],
            )
            .map_err(RepoError::query("executing update"))?;

        debug!(
            "event=contact_update module=repo id={} rows_affected={changed}",
            contact.id
        );
        if changed == 0 {
            return Err(RepoError::NotFound(contact.id));
        }

        Ok(contact.clone())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<ContactId> {
        let changed = self
            .conn
            .execute("DELETE FROM contact WHERE id = ?1;", params![id])
            .map_err(RepoError::query("executing delete"))?;

        debug!("event=contact_delete module=repo id={id} rows_affected={changed}");
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(id)
    }
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
    })
}
