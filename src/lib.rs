//! contactbook - terminal client for a contacts server
//!
//! This library provides the client side of a small contact-management
//! service: signing in and up, listing and searching contacts, editing and
//! deleting them, and remembering the access token and display language
//! between runs.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP client for the contacts server and an in-process fake
//! - `session`: Token/language persistence and the view guard
//! - `contacts`: Cached contact list, search filter, and edit session
//! - `forms`: Field validation plus the sign-in, sign-up, and edit forms
//! - `i18n`: English and Slovak message tables
//! - `app`: The running client tying the pieces together
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use contactbook::{commands, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut app = commands::build_app(&config)?;
//!     app.open_dashboard().await?;
//!     println!("{} contacts", app.contacts().contacts().len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contacts;
pub mod error;
pub mod forms;
pub mod i18n;
pub mod session;

// Re-export commonly used types
pub use api::{ApiHandle, Contact, ContactApi, ContactId, HttpApiClient};
pub use app::App;
pub use config::Config;
pub use error::{ContactbookError, Result};
pub use i18n::{Locale, Translator};
pub use session::{SessionContext, SessionHandle, View};
