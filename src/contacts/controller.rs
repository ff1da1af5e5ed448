//! Contact list controller
//!
//! Bridges [`ContactApi`](crate::api::ContactApi) calls and
//! [`ContactListState`]. A failed call leaves the state exactly as it was and
//! hands the error back to the caller.

use super::state::{ContactEvent, ContactListState};
use crate::api::{ApiHandle, Contact, ContactId};
use crate::error::Result;

/// Owns the cached contact list and mediates refresh, search, delete, and
/// the edit session
pub struct ContactListController {
    api: ApiHandle,
    state: ContactListState,
}

impl ContactListController {
    /// Create a controller with an empty cache
    pub fn new(api: ApiHandle) -> Self {
        Self {
            api,
            state: ContactListState::new(),
        }
    }

    /// API used for list and delete calls, shared with the edit form
    pub fn api(&self) -> &ApiHandle {
        &self.api
    }

    /// Current state snapshot
    pub fn state(&self) -> &ContactListState {
        &self.state
    }

    /// All cached contacts
    pub fn contacts(&self) -> &[Contact] {
        self.state.contacts()
    }

    /// Contacts matching the current query
    pub fn filtered(&self) -> &[Contact] {
        self.state.filtered()
    }

    /// Current search text
    pub fn query(&self) -> &str {
        self.state.query()
    }

    /// Contact open for editing, if any
    pub fn editing(&self) -> Option<&Contact> {
        self.state.editing()
    }

    /// Cached contact with `id`
    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.state.find(id)
    }

    fn transition(&mut self, event: ContactEvent) {
        let prior = std::mem::take(&mut self.state);
        self.state = prior.apply(event);
    }

    /// Reload the list from the server.
    ///
    /// On success the cache is replaced and the query cleared.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous list stays in place
    pub async fn refresh(&mut self) -> Result<()> {
        match self.api.list_contacts().await {
            Ok(contacts) => {
                tracing::debug!("Loaded {} contacts", contacts.len());
                self.transition(ContactEvent::Loaded(contacts));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to refresh contacts: {}", e);
                Err(e)
            }
        }
    }

    /// Set the search text and re-derive the filtered view
    pub fn search(&mut self, text: &str) {
        self.transition(ContactEvent::QueryChanged(text.to_string()));
    }

    /// Delete a contact on the server, then drop it from the cache.
    ///
    /// An id that is not cached is still sent to the server; locally it is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns the API error; nothing is removed locally
    pub async fn remove(&mut self, id: ContactId) -> Result<()> {
        match self.api.delete_contact(id).await {
            Ok(()) => {
                tracing::debug!("Deleted contact {}", id);
                self.transition(ContactEvent::Removed(id));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to delete contact {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Open `contact` for editing, replacing any open edit session
    pub fn begin_edit(&mut self, contact: Contact) {
        if let Some(open) = self.state.editing() {
            tracing::debug!("Closing edit of {} to open {}", open.id, contact.id);
        }
        self.transition(ContactEvent::EditOpened(contact));
    }

    /// Close the edit session
    pub fn end_edit(&mut self) {
        self.transition(ContactEvent::EditClosed);
    }
}
