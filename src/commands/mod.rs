/*!
Command handlers for the CLI

Each one-shot subcommand builds on an [`App`]: it signs in, lists, edits,
or deletes through the same guard and controllers the interactive shell
uses, prints a human-readable result, and returns the error (already
reported to the user) so the process exits non-zero.

- `shell`: interactive dashboard
- `render`: tables and failure messages
*/

use std::sync::Arc;

use colored::Colorize;

use crate::api::{ApiHandle, ContactId, HttpApiClient};
use crate::app::App;
use crate::config::Config;
use crate::error::{ContactbookError, Result};
use crate::forms::{ContactField, EditForm, SignInForm, SignUpForm};
use crate::i18n::Locale;
use crate::session::{open_store, SessionContext, SessionHandle};

pub mod render;
pub mod shell;

use render::{print_contacts, report_failure};

/// Wire the configured session store and HTTP client into an [`App`]
///
/// # Errors
///
/// Returns error if the session store or HTTP client cannot be created
pub fn build_app(config: &Config) -> Result<App> {
    let store = open_store(&config.storage)?;
    let session: SessionHandle = Arc::new(SessionContext::new(store));
    let api: ApiHandle = Arc::new(HttpApiClient::new(&config.api, session.clone())?);
    tracing::debug!(
        base_url = %config.api.base_url,
        backend = ?config.storage.backend,
        "Client initialized"
    );
    App::new(session, api)
}

/// Print `result`'s failure in the active language and hand it back
fn reported<T>(app: &App, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        report_failure(app, e);
    }
    result
}

/// Sign in and store the returned token
pub async fn login(app: &mut App, username: String, password: String) -> Result<()> {
    let result = app.sign_in(&SignInForm::new(username, password)).await;
    reported(app, result)?;
    println!("{}", app.t("signedIn").green());
    Ok(())
}

/// Create an account
pub async fn register(
    app: &mut App,
    email: String,
    username: String,
    password: String,
) -> Result<()> {
    let result = app
        .sign_up(&SignUpForm::new(email, username, password))
        .await;
    reported(app, result)?;
    println!("{}", app.t("registered").green());
    Ok(())
}

/// Forget the stored token
pub fn logout(app: &mut App) -> Result<()> {
    app.logout()?;
    println!("{}", app.t("signedOut"));
    Ok(())
}

/// Report whether a token is stored and which language is active
pub fn whoami(app: &App) {
    let status = if app.session().is_authenticated() {
        app.t("signedIn").green()
    } else {
        app.t("notSignedIn").yellow()
    };
    println!("{}", status);
    println!("{}: {}", app.t("language"), app.locale());
}

/// Load the dashboard and print the (optionally filtered) list
pub async fn list(app: &mut App, search: Option<String>) -> Result<()> {
    let result = app.open_dashboard().await;
    reported(app, result)?;
    if let Some(text) = search {
        app.contacts_mut().search(&text);
    }
    print_contacts(app, app.contacts().filtered());
    Ok(())
}

/// Apply `changes` to contact `id` and save through the edit form
pub async fn edit(
    app: &mut App,
    id: ContactId,
    changes: Vec<(ContactField, String)>,
) -> Result<()> {
    let result = edit_inner(app, id, changes).await;
    reported(app, result)?;
    println!("{}", app.t("saved").green());
    Ok(())
}

async fn edit_inner(
    app: &mut App,
    id: ContactId,
    changes: Vec<(ContactField, String)>,
) -> Result<()> {
    app.open_dashboard().await?;
    let contact = app
        .contacts()
        .find(id)
        .cloned()
        .ok_or(ContactbookError::ContactNotFound(id))?;

    let mut form = EditForm::open(app.contacts_mut(), contact);
    for (field, value) in changes {
        form.set(field, value);
    }
    form.submit(app.contacts_mut()).await?;
    Ok(())
}

/// Delete contact `id`
pub async fn delete(app: &mut App, id: ContactId) -> Result<()> {
    let result = delete_inner(app, id).await;
    reported(app, result)?;
    println!("{}", app.t("deleted").green());
    Ok(())
}

async fn delete_inner(app: &mut App, id: ContactId) -> Result<()> {
    app.open_dashboard().await?;
    app.contacts_mut().remove(id).await
}

/// Show the active language, or store a new one
pub fn language(app: &mut App, code: Option<String>) -> Result<()> {
    if let Some(code) = code {
        let locale: Locale = code.parse()?;
        app.set_locale(locale)?;
    }
    println!("{}: {}", app.t("language"), app.locale());
    Ok(())
}
