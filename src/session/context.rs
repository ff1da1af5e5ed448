//! Session context
//!
//! [`SessionContext`] owns the persisted token and language preference. One
//! is created at startup and shared by [`SessionHandle`] with the API client,
//! the forms, and the session guard.

use std::sync::Arc;

use super::store::{MemoryStore, SessionStore, LANGUAGE_KEY, TOKEN_KEY};
use crate::error::Result;
use crate::i18n::Locale;

/// Shared handle to the session
pub type SessionHandle = Arc<SessionContext>;

/// Token and locale state backed by a [`SessionStore`]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Wrap an existing store
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A session that persists nothing
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::session::SessionContext;
    ///
    /// let session = SessionContext::in_memory();
    /// assert!(!session.is_authenticated());
    /// session.set_token("abc123").unwrap();
    /// assert_eq!(session.token().as_deref(), Some("abc123"));
    /// ```
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current bearer token.
    ///
    /// An empty stored value counts as no token. Storage read failures are
    /// logged and treated as no token.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    /// Whether a token is present. Says nothing about server-side validity.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a new token
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        tracing::info!("Session token stored");
        Ok(())
    }

    /// Forget the token
    pub fn clear_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        tracing::info!("Session token cleared");
        Ok(())
    }

    /// Stored language preference, `en` when absent or unrecognized
    pub fn locale(&self) -> Locale {
        match self.store.get(LANGUAGE_KEY) {
            Ok(code) => Locale::from_stored(code.as_deref()),
            Err(e) => {
                tracing::warn!("Failed to read language preference: {}", e);
                Locale::default()
            }
        }
    }

    /// Persist the language preference
    pub fn set_locale(&self, locale: Locale) -> Result<()> {
        self.store.set(LANGUAGE_KEY, locale.code())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("locale", &self.locale())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::FileStore;
    use tempfile::TempDir;

    #[test]
    fn test_token_lifecycle() {
        let session = SessionContext::in_memory();
        assert_eq!(session.token(), None);

        session.set_token("abc123").unwrap();
        assert!(session.is_authenticated());

        session.clear_token().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let session = SessionContext::in_memory();
        session.set_token("").unwrap();
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_locale_defaults_and_persists() {
        let session = SessionContext::in_memory();
        assert_eq!(session.locale(), Locale::En);
        session.set_locale(Locale::Sk).unwrap();
        assert_eq!(session.locale(), Locale::Sk);
    }

    #[test]
    fn test_unrecognized_stored_locale_falls_back() {
        let store = Arc::new(MemoryStore::new());
        store.set(LANGUAGE_KEY, "de").unwrap();
        let session = SessionContext::new(store);
        assert_eq!(session.locale(), Locale::En);
    }

    #[test]
    fn test_corrupt_store_reads_as_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{{{").unwrap();
        let session = SessionContext::new(Arc::new(FileStore::new(&path)));
        assert_eq!(session.token(), None);
        assert_eq!(session.locale(), Locale::En);
    }

    #[test]
    fn test_corrupt_store_recovers_on_sign_in_and_logout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{{{").unwrap();
        let session = SessionContext::new(Arc::new(FileStore::new(&path)));

        session.set_token("abc123").unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));

        std::fs::write(&path, "{{{").unwrap();
        session.clear_token().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clear_token_keeps_locale() {
        let session = SessionContext::in_memory();
        session.set_token("t").unwrap();
        session.set_locale(Locale::Sk).unwrap();
        session.clear_token().unwrap();
        assert_eq!(session.locale(), Locale::Sk);
    }
}
