//! Contact edit form
//!
//! Holds the in-progress values for one contact. Submitting validates all
//! six fields, sends the update, refreshes the list, and closes the edit
//! session. Any failure leaves the draft untouched so it can be retried.

use std::fmt;
use std::str::FromStr;

use super::validation::{FormValues, Rule, Schema, ValidationErrors};
use crate::api::{Contact, ContactId};
use crate::contacts::ContactListController;
use crate::error::{ContactbookError, Result};

/// Editable contact fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    Address,
    Note,
}

impl ContactField {
    /// Fields in form order
    pub const ALL: [ContactField; 6] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::PhoneNumber,
        ContactField::Email,
        ContactField::Address,
        ContactField::Note,
    ];

    /// Wire and validation name; also the i18n label key
    pub fn name(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::PhoneNumber => "phoneNumber",
            ContactField::Email => "email",
            ContactField::Address => "address",
            ContactField::Note => "note",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ContactField {
    type Err = ContactbookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ContactField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContactbookError::Config(format!("Unknown contact field: {}", s)))
    }
}

/// Validation rules for the edit form
pub fn contact_schema() -> Schema {
    Schema::new()
        .field("firstName", [Rule::Required])
        .field("lastName", [Rule::Required])
        .field("phoneNumber", [Rule::Required])
        .field("email", [Rule::Required, Rule::Email])
        .field("address", [Rule::Required])
        .field("note", [Rule::Required])
}

/// Editable values of a contact, without its id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub note: String,
}

impl ContactDraft {
    /// Current value of `field`
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Email => &self.email,
            ContactField::Address => &self.address,
            ContactField::Note => &self.note,
        }
    }

    /// Overwrite `field`
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::PhoneNumber => &mut self.phone_number,
            ContactField::Email => &mut self.email,
            ContactField::Address => &mut self.address,
            ContactField::Note => &mut self.note,
        };
        *slot = value;
    }

    /// Build the payload for `id`, trimming every field
    pub fn to_contact(&self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            note: self.note.trim().to_string(),
        }
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
            address: contact.address.clone(),
            note: contact.note.clone(),
        }
    }
}

impl FormValues for ContactDraft {
    fn value(&self, field: &str) -> Option<&str> {
        field
            .parse::<ContactField>()
            .ok()
            .map(|field| self.get(field))
    }
}

/// Edit form for a single contact
#[derive(Debug, Clone)]
pub struct EditForm {
    id: ContactId,
    draft: ContactDraft,
    errors: ValidationErrors,
}

impl EditForm {
    /// Open `contact` in the controller's edit session and return its form
    pub fn open(controller: &mut ContactListController, contact: Contact) -> Self {
        let form = Self::from_contact(&contact);
        controller.begin_edit(contact);
        form
    }

    /// Form prefilled with `contact`, not tied to an edit session
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            draft: ContactDraft::from(contact),
            errors: ValidationErrors::default(),
        }
    }

    /// Id of the contact being edited
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// In-progress values
    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    /// Errors from the last validation
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Change one field
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Run the schema and record the result; `true` when every field passes
    pub fn validate(&mut self) -> bool {
        self.errors = contact_schema().validate(&self.draft);
        self.errors.is_empty()
    }

    /// Validate and persist the draft.
    ///
    /// On success the controller is refreshed and its edit session closed.
    /// A refresh failure after a successful update is logged but does not
    /// fail the submit.
    ///
    /// # Errors
    ///
    /// Returns [`ContactbookError::Validation`] without calling the API when
    /// a field is invalid, or the API error when the update fails. The draft
    /// is kept in both cases.
    pub async fn submit(&mut self, controller: &mut ContactListController) -> Result<Contact> {
        if !self.validate() {
            tracing::debug!("Edit of contact {} blocked: {}", self.id, self.errors);
            return Err(ContactbookError::Validation(self.errors.clone()).into());
        }

        let payload = self.draft.to_contact(self.id);
        let updated = controller
            .api()
            .update_contact(&payload)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to update contact {}: {}", self.id, e);
                e
            })?;

        if let Err(e) = controller.refresh().await {
            tracing::warn!("Contact {} saved but list refresh failed: {}", self.id, e);
        }
        controller.end_edit();
        tracing::info!("Contact {} updated", updated.id);

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FakeContactApi, Operation};
    use crate::forms::validation::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
    use std::sync::Arc;

    fn ann() -> Contact {
        Contact {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            phone_number: "555-0100".to_string(),
            email: "ann@example.com".to_string(),
            address: "1 Main St".to_string(),
            note: "friend".to_string(),
        }
    }

    async fn setup() -> (Arc<FakeContactApi>, ContactListController) {
        let api = Arc::new(FakeContactApi::with_contacts(vec![ann()]));
        let mut controller = ContactListController::new(api.clone());
        controller.refresh().await.unwrap();
        (api, controller)
    }

    #[test]
    fn test_field_names_parse_back() {
        for field in ContactField::ALL {
            assert_eq!(field.name().parse::<ContactField>().unwrap(), field);
        }
        assert_eq!(
            "PHONENUMBER".parse::<ContactField>().unwrap(),
            ContactField::PhoneNumber
        );
        assert!("nickname".parse::<ContactField>().is_err());
    }

    #[test]
    fn test_schema_covers_all_fields() {
        let names: Vec<&str> = contact_schema().field_names().collect();
        let expected: Vec<&str> = ContactField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_email_validation() {
        let mut form = EditForm::from_contact(&ann());
        form.set(ContactField::Email, "not-an-email");
        assert!(!form.validate());
        assert_eq!(form.errors().get("email"), Some(EMAIL_MESSAGE));

        form.set(ContactField::Email, "a@b.com");
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_empty_field_skips_update() {
        let (api, mut controller) = setup().await;
        for field in ContactField::ALL {
            let mut form = EditForm::open(&mut controller, ann());
            form.set(field, "  ");

            let err = form.submit(&mut controller).await.unwrap_err();

            match err.downcast_ref::<ContactbookError>() {
                Some(ContactbookError::Validation(errors)) => {
                    assert_eq!(errors.get(field.name()), Some(REQUIRED_MESSAGE));
                }
                other => panic!("expected validation error, got {:?}", other),
            }
            assert_eq!(form.errors().get(field.name()), Some(REQUIRED_MESSAGE));
            assert!(controller.editing().is_some());
        }
        assert_eq!(api.calls(Operation::Update), 0);
    }

    #[tokio::test]
    async fn test_submit_success_refreshes_and_closes() {
        let (api, mut controller) = setup().await;
        let mut form = EditForm::open(&mut controller, ann());
        form.set(ContactField::FirstName, "  Annie ");
        controller.search("zzz");

        let updated = form.submit(&mut controller).await.unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(updated.first_name, "Annie");
        assert_eq!(api.last_update().unwrap().first_name, "Annie");
        assert!(controller.editing().is_none());
        assert_eq!(controller.query(), "");
        assert_eq!(controller.find(1).unwrap().first_name, "Annie");
        assert_eq!(api.calls(Operation::List), 2);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form_open() {
        let (api, mut controller) = setup().await;
        api.fail(Operation::Update, true);
        let mut form = EditForm::open(&mut controller, ann());
        form.set(ContactField::Note, "colleague");

        assert!(form.submit(&mut controller).await.is_err());

        assert_eq!(form.draft().note, "colleague");
        assert_eq!(controller.editing().map(|c| c.id), Some(1));
        assert_eq!(controller.find(1).unwrap().note, "friend");
        assert_eq!(api.calls(Operation::List), 1);

        api.fail(Operation::Update, false);
        form.submit(&mut controller).await.unwrap();
        assert_eq!(controller.find(1).unwrap().note, "colleague");
    }

    #[tokio::test]
    async fn test_refresh_failure_after_update_still_closes() {
        let (api, mut controller) = setup().await;
        let mut form = EditForm::open(&mut controller, ann());
        form.set(ContactField::LastName, "Smith");
        api.fail(Operation::List, true);

        let updated = form.submit(&mut controller).await.unwrap();

        assert_eq!(updated.last_name, "Smith");
        assert!(controller.editing().is_none());
        assert_eq!(controller.find(1).unwrap().last_name, "Lee");
    }
}
