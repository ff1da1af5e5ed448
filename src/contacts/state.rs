//! Contact list state and its transitions
//!
//! All changes to the list go through [`ContactListState::apply`], which
//! takes the prior state and one [`ContactEvent`] and returns the next state.
//! Network responses become events, so a late response simply becomes a
//! later transition.

use std::collections::HashSet;

use crate::api::{Contact, ContactId};

/// Something that changes the contact list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    /// A list response arrived; replaces the cache and clears the query
    Loaded(Vec<Contact>),
    /// The search text changed
    QueryChanged(String),
    /// The server confirmed a delete
    Removed(ContactId),
    /// A contact was opened in the edit form
    EditOpened(Contact),
    /// The edit form was closed
    EditClosed,
}

/// Cached contacts, search query, derived filtered view, and the single
/// contact open for editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListState {
    contacts: Vec<Contact>,
    query: String,
    filtered: Vec<Contact>,
    editing: Option<Contact>,
}

impl ContactListState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// All cached contacts in server order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Current search text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Contacts matching the query, in cache order
    pub fn filtered(&self) -> &[Contact] {
        &self.filtered
    }

    /// Contact currently open for editing
    pub fn editing(&self) -> Option<&Contact> {
        self.editing.as_ref()
    }

    /// Cached contact with `id`
    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Compute the state after `event`
    pub fn apply(mut self, event: ContactEvent) -> Self {
        match event {
            ContactEvent::Loaded(contacts) => {
                self.contacts = dedup_by_id(contacts);
                self.query.clear();
                self.filtered = self.contacts.clone();
            }
            ContactEvent::QueryChanged(query) => {
                self.filtered = filter_contacts(&self.contacts, &query);
                self.query = query;
            }
            ContactEvent::Removed(id) => {
                self.contacts.retain(|c| c.id != id);
                self.filtered = filter_contacts(&self.contacts, &self.query);
                if self.editing.as_ref().map(|c| c.id) == Some(id) {
                    self.editing = None;
                }
            }
            ContactEvent::EditOpened(contact) => {
                self.editing = Some(contact);
            }
            ContactEvent::EditClosed => {
                self.editing = None;
            }
        }
        self
    }
}

/// Contacts whose first or last name contains `query`, ignoring case.
///
/// An empty query matches everything. Order is preserved.
///
/// # Examples
///
/// ```
/// use contactbook::api::Contact;
/// use contactbook::contacts::filter_contacts;
///
/// let ann = Contact {
///     id: 1,
///     first_name: "Ann".into(),
///     last_name: "Lee".into(),
///     phone_number: "1".into(),
///     email: "ann@example.com".into(),
///     address: "x".into(),
///     note: "y".into(),
/// };
/// assert_eq!(filter_contacts(&[ann.clone()], "AN"), vec![ann]);
/// ```
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    if query.is_empty() {
        return contacts.to_vec();
    }
    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.first_name.to_lowercase().contains(&needle)
                || c.last_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

fn dedup_by_id(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut seen = HashSet::new();
    let total = contacts.len();
    let unique: Vec<Contact> = contacts.into_iter().filter(|c| seen.insert(c.id)).collect();
    if unique.len() != total {
        tracing::warn!(
            "Dropped {} contacts with duplicate ids from list response",
            total - unique.len()
        );
    }
    unique
}
