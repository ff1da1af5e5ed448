//! Declarative field validation
//!
//! A [`Schema`] is an ordered list of fields, each with a list of [`Rule`]s.
//! Evaluating a schema against a [`FormValues`] source produces a
//! [`ValidationErrors`] map from field name to an i18n message key. Only the
//! first failing rule of each field is reported.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Message key reported when a required field is blank
pub const REQUIRED_MESSAGE: &str = "validation.required";
/// Message key reported when a field is shorter than its minimum length
pub const MIN_LENGTH_MESSAGE: &str = "validation.minLength";
/// Message key reported when a field is not shaped like an email address
pub const EMAIL_MESSAGE: &str = "validation.email";

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty after trimming
    Required,
    /// Value must contain at least this many characters
    MinLength(usize),
    /// Value must look like `local@domain.tld`
    Email,
}

impl Rule {
    /// Check a value against this rule, returning the message key on failure
    fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Rule::Required => value.trim().is_empty().then_some(REQUIRED_MESSAGE),
            Rule::MinLength(min) => (value.chars().count() < *min).then_some(MIN_LENGTH_MESSAGE),
            Rule::Email => (!is_email(value.trim())).then_some(EMAIL_MESSAGE),
        }
    }
}

/// Returns `true` when `value` is shaped like an email address.
///
/// # Examples
///
/// ```
/// use contactbook::forms::validation::is_email;
///
/// assert!(is_email("a@b.com"));
/// assert!(!is_email("not-an-email"));
/// ```
pub fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").ok())
        .as_ref()
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Source of raw form values, looked up by field name
pub trait FormValues {
    /// Returns the current value of `field`, or `None` if the form has no
    /// such field
    fn value(&self, field: &str) -> Option<&str>;
}

/// Field-level validation failures
///
/// Maps a field name to the i18n key of the first rule it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Record a failure for `field`
    pub fn insert(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    /// The message key recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether `field` failed validation
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Whether every field passed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over `(field, message key)` pairs in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its rules
    pub fn field(mut self, name: &'static str, rules: impl Into<Vec<Rule>>) -> Self {
        self.fields.push((name, rules.into()));
        self
    }

    /// Names of the fields this schema checks, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Evaluate every field of the schema against `values`.
    ///
    /// A field absent from `values` is treated as an empty string. A blank
    /// value that is not `Required` skips its remaining rules.
    pub fn validate(&self, values: &dyn FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        for (name, rules) in &self.fields {
            let value = values.value(name).unwrap_or("");
            let required = rules.contains(&Rule::Required);
            if value.trim().is_empty() && !required {
                continue;
            }

            if let Some(message) = rules.iter().find_map(|rule| rule.check(value)) {
                errors.insert(name, message);
            }
        }

        errors
    }
}
