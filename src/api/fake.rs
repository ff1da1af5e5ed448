//! In-process fake of the contacts API
//!
//! [`FakeContactApi`] keeps contacts in memory and records how many times
//! each operation was called, so controller and form behaviour can be tested
//! without a server. Failure can be switched on per operation.
//!
//! # Example
//!
//! ```
//! use contactbook::api::{ContactApi, FakeContactApi, Operation};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let api = FakeContactApi::new();
//! api.fail(Operation::List, true);
//! assert!(api.list_contacts().await.is_err());
//! assert_eq!(api.calls(Operation::List), 1);
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::types::{Contact, ContactId, SignInResponse, SignUpResponse};
use super::ContactApi;
use crate::error::{ContactbookError, Result};

/// API operations, used to address call counters and failure switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SignIn,
    SignUp,
    List,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct FakeState {
    contacts: Vec<Contact>,
    sign_in_token: Option<String>,
    sign_up_success: bool,
    failing: HashSet<Operation>,
    calls: HashMap<Operation, usize>,
    last_update: Option<Contact>,
    last_username: Option<String>,
}

/// In-memory [`ContactApi`]
#[derive(Debug, Default)]
pub struct FakeContactApi {
    state: Mutex<FakeState>,
}

impl FakeContactApi {
    /// An empty fake: no contacts, sign-in yields no token, sign-up fails
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake preloaded with `contacts`
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let api = Self::new();
        api.state().contacts = contacts;
        api
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Token returned by the next sign-in calls; `None` omits it
    pub fn set_sign_in_token(&self, token: Option<&str>) {
        self.state().sign_in_token = token.map(str::to_string);
    }

    /// Value of `success` returned by sign-up
    pub fn set_sign_up_success(&self, success: bool) {
        self.state().sign_up_success = success;
    }

    /// Make `operation` fail with a 500 until switched back
    pub fn fail(&self, operation: Operation, failing: bool) {
        let mut state = self.state();
        if failing {
            state.failing.insert(operation);
        } else {
            state.failing.remove(&operation);
        }
    }

    /// Replace the server-side contact list
    pub fn set_contacts(&self, contacts: Vec<Contact>) {
        self.state().contacts = contacts;
    }

    /// Snapshot of the server-side contact list
    pub fn contacts(&self) -> Vec<Contact> {
        self.state().contacts.clone()
    }

    /// Number of times `operation` was invoked, failed calls included
    pub fn calls(&self, operation: Operation) -> usize {
        self.state().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Payload of the most recent update call
    pub fn last_update(&self) -> Option<Contact> {
        self.state().last_update.clone()
    }

    /// Username sent by the most recent sign-in or sign-up call
    pub fn last_username(&self) -> Option<String> {
        self.state().last_username.clone()
    }

    fn begin(&self, operation: Operation) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        *state.calls.entry(operation).or_insert(0) += 1;
        if state.failing.contains(&operation) {
            return Err(ContactbookError::Api {
                status: 500,
                message: format!("{:?} failed", operation),
            }
            .into());
        }
        Ok(state)
    }
}

#[async_trait]
impl ContactApi for FakeContactApi {
    async fn sign_in(&self, username: &str, _password: &str) -> Result<SignInResponse> {
        let mut state = self.begin(Operation::SignIn)?;
        state.last_username = Some(username.to_string());
        Ok(SignInResponse {
            access_token: state.sign_in_token.clone(),
        })
    }

    async fn sign_up(
        &self,
        _email: &str,
        username: &str,
        _password: &str,
    ) -> Result<SignUpResponse> {
        let mut state = self.begin(Operation::SignUp)?;
        state.last_username = Some(username.to_string());
        Ok(SignUpResponse {
            success: state.sign_up_success,
        })
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let state = self.begin(Operation::List)?;
        Ok(state.contacts.clone())
    }

    async fn update_contact(&self, contact: &Contact) -> Result<Contact> {
        let mut state = self.begin(Operation::Update)?;
        state.last_update = Some(contact.clone());
        match state.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(stored) => {
                *stored = contact.clone();
                Ok(stored.clone())
            }
            None => Err(ContactbookError::Api {
                status: 404,
                message: format!("Contact {} not found", contact.id),
            }
            .into()),
        }
    }

    async fn delete_contact(&self, id: ContactId) -> Result<()> {
        let mut state = self.begin(Operation::Delete)?;
        state.contacts.retain(|c| c.id != id);
        Ok(())
    }
}
