//! Contacts API abstraction
//!
//! [`ContactApi`] is the seam between the client state (controller, forms)
//! and the network. [`HttpApiClient`] talks to the real server;
//! [`FakeContactApi`] is an in-process stand-in for tests.
//!
//! Every call is a single attempt. Transport failures and non-2xx responses
//! are returned as errors with no retry.

pub mod client;
pub mod fake;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use client::HttpApiClient;
pub use fake::{FakeContactApi, Operation};
pub use types::{Contact, ContactId, SignInResponse, SignUpResponse};

/// Path of the registration endpoint
pub const SIGN_UP_PATH: &str = "/auth/register";
/// Path of the login endpoint
pub const SIGN_IN_PATH: &str = "/auth/login";
/// Path of the contacts collection
pub const CONTACTS_PATH: &str = "/contacts";

/// Operations offered by the contacts API
#[async_trait]
pub trait ContactApi: Send + Sync {
    /// Exchange credentials for an access token.
    ///
    /// The caller is responsible for persisting the returned token.
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResponse>;

    /// Register a new account
    async fn sign_up(&self, email: &str, username: &str, password: &str)
        -> Result<SignUpResponse>;

    /// Fetch all contacts in server order
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Replace the contact with `contact.id`, returning the server's copy.
    ///
    /// Any 2xx counts as saved; when the response body is not a contact the
    /// sent payload is returned instead.
    async fn update_contact(&self, contact: &Contact) -> Result<Contact>;

    /// Delete the contact with the given id
    async fn delete_contact(&self, id: ContactId) -> Result<()>;
}

/// Shared handle to an API implementation
pub type ApiHandle = Arc<dyn ContactApi>;
