//! Contact record.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - Callers never choose the identifier of a new contact.

use serde::{Deserialize, Serialize};

/// Store-assigned contact identifier.
pub type ContactId = i64;

/// One row of the `contact` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Zero until the store has assigned an identifier.
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// Creates an unsaved contact; the identifier is filled in by the store.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self::with_id(0, name, email, phone)
    }

    /// Creates a contact bound to an existing identifier.
    ///
    /// Used to target update calls at a stored row.
    pub fn with_id(
        id: ContactId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Whether this value carries a store-assigned identifier.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}
