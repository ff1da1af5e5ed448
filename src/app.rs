//! Application state: current view plus the components behind it
//!
//! [`App`] is what the CLI drives. It applies the session guard on every
//! navigation, loads the contact list when the dashboard is entered, and
//! keeps the current view unchanged when a form submission fails.

use crate::api::ApiHandle;
use crate::contacts::ContactListController;
use crate::error::{ContactbookError, Result};
use crate::forms::{SignInForm, SignUpForm};
use crate::i18n::{Locale, Translator};
use crate::session::{self, SessionHandle, View};

/// The running client
pub struct App {
    session: SessionHandle,
    api: ApiHandle,
    view: View,
    contacts: ContactListController,
    translator: Translator,
}

impl App {
    /// Create the app on the sign-in view (redirected by the guard) with the
    /// stored language active. Does not contact the server.
    pub fn new(session: SessionHandle, api: ApiHandle) -> Result<Self> {
        let translator = Translator::new(session.locale())?;
        let view = session::resolve(View::SignIn, &session);
        Ok(Self {
            contacts: ContactListController::new(api.clone()),
            session,
            api,
            view,
            translator,
        })
    }

    /// Current view
    pub fn view(&self) -> View {
        self.view
    }

    /// Shared session
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Contact list controller
    pub fn contacts(&self) -> &ContactListController {
        &self.contacts
    }

    /// Contact list controller, mutably
    pub fn contacts_mut(&mut self) -> &mut ContactListController {
        &mut self.contacts
    }

    /// Translate a message key in the active language
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translator.t(key)
    }

    /// Active language
    pub fn locale(&self) -> Locale {
        self.translator.locale()
    }

    /// Switch and persist the display language
    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.session.set_locale(locale)?;
        self.translator.set_locale(locale);
        tracing::debug!("Language set to {}", locale);
        Ok(())
    }

    /// Go to `requested`, subject to the session guard.
    ///
    /// Entering the dashboard reloads the contact list; a failed load is
    /// logged and the stale list stays.
    pub async fn navigate(&mut self, requested: View) -> View {
        let landed = session::resolve(requested, &self.session);
        if landed == View::Dashboard {
            if let Err(e) = self.open_dashboard().await {
                tracing::warn!("Could not load contacts on entering dashboard: {}", e);
            }
        } else {
            self.view = landed;
        }
        landed
    }

    /// Enter the dashboard and load the contact list.
    ///
    /// # Errors
    ///
    /// [`ContactbookError::Authentication`] when no token is stored (the
    /// view moves to sign-in), or the list error (the view is the dashboard
    /// with the previous list)
    pub async fn open_dashboard(&mut self) -> Result<()> {
        if session::resolve(View::Dashboard, &self.session) != View::Dashboard {
            self.view = View::SignIn;
            return Err(ContactbookError::Authentication("not signed in".to_string()).into());
        }
        self.view = View::Dashboard;
        self.contacts.refresh().await
    }

    /// Submit the sign-in form; on success move to the dashboard.
    ///
    /// # Errors
    ///
    /// The form's error; the view stays on sign-in
    pub async fn sign_in(&mut self, form: &SignInForm) -> Result<View> {
        let next = form.submit(self.api.as_ref(), &self.session).await?;
        Ok(self.navigate(next).await)
    }

    /// Submit the sign-up form; on success move to sign-in.
    ///
    /// # Errors
    ///
    /// The form's error; the view stays on sign-up
    pub async fn sign_up(&mut self, form: &SignUpForm) -> Result<View> {
        let next = form.submit(self.api.as_ref()).await?;
        Ok(self.navigate(next).await)
    }

    /// Clear the token, drop the cached contacts, and return to sign-in
    pub fn logout(&mut self) -> Result<View> {
        self.view = session::logout(&self.session)?;
        self.contacts = ContactListController::new(self.api.clone());
        tracing::info!("Logged out");
        Ok(self.view)
    }
}
