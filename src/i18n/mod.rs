//! Localization
//!
//! Two locales are bundled as flat JSON maps from message key to display
//! string. Lookups fall back to English and then to the key itself.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ContactbookError, Result};

const ENGLISH: &str = include_str!("en.json");
const SLOVAK: &str = include_str!("sk.json");

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English, the fallback
    #[default]
    En,
    /// Slovak
    Sk,
}

impl Locale {
    /// All supported locales
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Sk];

    /// Persisted code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Sk => "sk",
        }
    }

    /// Parse a locale code, ignoring case and surrounding whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::i18n::Locale;
    ///
    /// assert_eq!(Locale::parse(" SK "), Some(Locale::Sk));
    /// assert_eq!(Locale::parse("de"), None);
    /// ```
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Locale::En),
            "sk" => Some(Locale::Sk),
            _ => None,
        }
    }

    /// Resolve a stored preference, falling back to English when it is
    /// absent or unrecognized
    pub fn from_stored(code: Option<&str>) -> Self {
        code.and_then(Self::parse).unwrap_or_default()
    }

    fn resource(&self) -> &'static str {
        match self {
            Locale::En => ENGLISH,
            Locale::Sk => SLOVAK,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = ContactbookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ContactbookError::Config(format!("Unsupported language: {} (expected en or sk)", s))
        })
    }
}

/// Message lookup for the active locale
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    messages: HashMap<Locale, HashMap<String, String>>,
}

impl Translator {
    /// Load the bundled resources and activate `locale`
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a bundled resource is not a flat
    /// JSON string map
    pub fn new(locale: Locale) -> Result<Self> {
        let mut messages = HashMap::new();
        for loc in Locale::ALL {
            let map: HashMap<String, String> = serde_json::from_str(loc.resource())?;
            messages.insert(loc, map);
        }
        Ok(Self { locale, messages })
    }

    /// Active locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch the active locale (does not persist it)
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Translate `key`
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::i18n::{Locale, Translator};
    ///
    /// let t = Translator::new(Locale::Sk).unwrap();
    /// assert_eq!(t.t("note"), "Poznámka");
    /// assert_eq!(t.t("no.such.key"), "no.such.key");
    /// ```
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(self.locale, key)
            .or_else(|| self.lookup(Locale::En, key))
            .unwrap_or(key)
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.messages
            .get(&locale)
            .and_then(|map| map.get(key))
            .map(String::as_str)
    }
}
