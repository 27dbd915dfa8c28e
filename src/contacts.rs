// 📇 Contact Book - ordered name/phone pairs with name search
//
// Contacts are only ever appended. The same name/phone pair may appear many
// times: every recorded sale adds one, and nothing deduplicates them.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONTACT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable identity (UUID) - never reused
    pub id: String,

    /// Display name
    pub name: String,

    /// Display phone, `(DD) DDDDD-DDDD`
    pub phone: String,
}

impl Contact {
    pub fn new(name: String, phone: String) -> Self {
        Contact {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone,
        }
    }

    /// Case-insensitive substring match on the name
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

// ============================================================================
// CONTACT BOOK
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    /// Insertion order preserved
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new() -> Self {
        ContactBook::default()
    }

    /// Store a new contact as given and return it.
    ///
    /// No validation happens here; the sale recording flow validates before calling.
    pub fn append(&mut self, name: impl Into<String>, phone: impl Into<String>) -> Contact {
        let contact = Contact::new(name.into(), phone.into());
        tracing::debug!(contact_id = %contact.id, "contact appended");

        self.contacts.push(contact.clone());
        contact
    }

    /// Contacts whose name contains `query` (case-insensitive), in insertion order.
    /// An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|c| c.matches(query))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
