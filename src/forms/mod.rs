//! Forms: schema validation plus the auth and contact edit flows

pub mod auth;
pub mod edit;
pub mod validation;

pub use auth::{SignInForm, SignUpForm};
pub use edit::{ContactDraft, ContactField, EditForm};
pub use validation::{Rule, Schema, ValidationErrors};
