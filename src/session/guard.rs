//! View routing guard
//!
//! Decides where a navigation request lands based only on whether a token
//! is stored locally. This is a convenience redirect, not an authorization
//! check; the server validates the token on every call.

use std::fmt;

use super::context::SessionContext;
use crate::error::Result;

/// Top-level screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Login form
    SignIn,
    /// Registration form
    SignUp,
    /// Contact list
    Dashboard,
}

impl View {
    /// Route path of the view
    pub fn path(&self) -> &'static str {
        match self {
            View::SignIn => "/login",
            View::SignUp => "/register",
            View::Dashboard => "/dashboard",
        }
    }

    /// Whether the view needs a session
    pub fn is_protected(&self) -> bool {
        matches!(self, View::Dashboard)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Resolve a navigation request.
///
/// Protected views without a token redirect to [`View::SignIn`]; the auth
/// views with a token redirect to [`View::Dashboard`].
///
/// # Examples
///
/// ```
/// use contactbook::session::{resolve, SessionContext, View};
///
/// let session = SessionContext::in_memory();
/// assert_eq!(resolve(View::Dashboard, &session), View::SignIn);
///
/// session.set_token("abc").unwrap();
/// assert_eq!(resolve(View::SignUp, &session), View::Dashboard);
/// ```
pub fn resolve(requested: View, session: &SessionContext) -> View {
    let authenticated = session.is_authenticated();
    let landed = match (requested.is_protected(), authenticated) {
        (true, false) => View::SignIn,
        (false, true) => View::Dashboard,
        _ => requested,
    };

    if landed != requested {
        tracing::debug!("Redirecting {} -> {}", requested, landed);
    }
    landed
}

/// Clear the token and return the view to show next
pub fn logout(session: &SessionContext) -> Result<View> {
    session.clear_token()?;
    Ok(View::SignIn)
}
