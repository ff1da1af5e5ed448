//! Sign-in and sign-up forms

use super::validation::{FormValues, Rule, Schema, ValidationErrors};
use crate::api::ContactApi;
use crate::error::{ContactbookError, Result};
use crate::session::{SessionContext, View};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Rules for the sign-in form: both fields non-empty
pub fn sign_in_schema() -> Schema {
    Schema::new()
        .field("username", [Rule::Required])
        .field("password", [Rule::Required])
}

/// Rules for the sign-up form
pub fn sign_up_schema() -> Schema {
    Schema::new()
        .field("username", [Rule::Required])
        .field("email", [Rule::Required, Rule::Email])
        .field(
            "password",
            [Rule::Required, Rule::MinLength(MIN_PASSWORD_LENGTH)],
        )
}

fn check(schema: Schema, values: &dyn FormValues) -> Result<()> {
    let errors: ValidationErrors = schema.validate(values);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ContactbookError::Validation(errors).into())
    }
}

/// Login credentials
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

impl SignInForm {
    /// Form with both fields filled
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check the fields without contacting the server
    pub fn validate(&self) -> ValidationErrors {
        sign_in_schema().validate(self)
    }

    /// Log in and store the returned token.
    ///
    /// Returns the view to show next ([`View::Dashboard`]).
    ///
    /// # Errors
    ///
    /// Validation errors, API errors, or [`ContactbookError::Authentication`]
    /// when the response carries no access token. The stored token is not
    /// touched on any error.
    pub async fn submit(&self, api: &dyn ContactApi, session: &SessionContext) -> Result<View> {
        check(sign_in_schema(), self)?;

        let response = api.sign_in(self.username.trim(), &self.password).await?;
        let token = match response.access_token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => {
                tracing::warn!(
                    "Something went wrong during signing in: no access token in response for {}",
                    self.username
                );
                return Err(ContactbookError::Authentication(
                    "login response did not contain an access token".to_string(),
                )
                .into());
            }
        };

        session.set_token(&token)?;
        tracing::info!("Signed in as {}", self.username);
        Ok(View::Dashboard)
    }
}

impl FormValues for SignInForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "username" => Some(&self.username),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

/// Registration details
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignUpForm {
    /// Form with all fields filled
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check the fields without contacting the server
    pub fn validate(&self) -> ValidationErrors {
        sign_up_schema().validate(self)
    }

    /// Register the account.
    ///
    /// Returns the view to show next ([`View::SignIn`]).
    ///
    /// # Errors
    ///
    /// Validation errors, API errors, or [`ContactbookError::Authentication`]
    /// when the server does not report success
    pub async fn submit(&self, api: &dyn ContactApi) -> Result<View> {
        check(sign_up_schema(), self)?;

        let response = api
            .sign_up(self.email.trim(), self.username.trim(), &self.password)
            .await?;
        if !response.success {
            tracing::warn!(
                "Something went wrong during signing up: server did not report success for {}",
                self.username
            );
            return Err(ContactbookError::Authentication(
                "registration was not accepted".to_string(),
            )
            .into());
        }

        tracing::info!("Registered {}", self.username);
        Ok(View::SignIn)
    }
}

impl FormValues for SignUpForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "email" => Some(&self.email),
            "username" => Some(&self.username),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FakeContactApi, Operation};
    use crate::forms::validation::{EMAIL_MESSAGE, MIN_LENGTH_MESSAGE, REQUIRED_MESSAGE};

    #[tokio::test]
    async fn test_sign_in_stores_token() {
        let api = FakeContactApi::new();
        api.set_sign_in_token(Some("abc123"));
        let session = SessionContext::in_memory();

        let view = SignInForm::new("ann", "secret")
            .submit(&api, &session)
            .await
            .unwrap();

        assert_eq!(view, View::Dashboard);
        assert_eq!(session.token().as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_sign_in_and_sign_up_trim_username_alike() {
        let api = FakeContactApi::new();
        api.set_sign_in_token(Some("abc123"));
        api.set_sign_up_success(true);

        SignUpForm::new("ann@example.com", " ann ", "secret")
            .submit(&api)
            .await
            .unwrap();
        let registered = api.last_username();

        SignInForm::new(" ann ", "secret")
            .submit(&api, &SessionContext::in_memory())
            .await
            .unwrap();

        assert_eq!(registered.as_deref(), Some("ann"));
        assert_eq!(api.last_username(), registered);
    }

    #[tokio::test]
    async fn test_sign_in_without_token_leaves_session() {
        let api = FakeContactApi::new();
        api.set_sign_in_token(None);
        let session = SessionContext::in_memory();
        session.set_token("previous").unwrap();

        let err = SignInForm::new("ann", "secret")
            .submit(&api, &session)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ContactbookError>(),
            Some(ContactbookError::Authentication(_))
        ));
        assert_eq!(session.token().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn test_sign_in_transport_failure_leaves_session() {
        let api = FakeContactApi::new();
        api.set_sign_in_token(Some("abc123"));
        api.fail(Operation::SignIn, true);
        let session = SessionContext::in_memory();

        assert!(SignInForm::new("ann", "secret")
            .submit(&api, &session)
            .await
            .is_err());
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_sign_in_requires_both_fields() {
        let api = FakeContactApi::new();
        let session = SessionContext::in_memory();

        let form = SignInForm::new("", "");
        let errors = form.validate();
        assert_eq!(errors.get("username"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get("password"), Some(REQUIRED_MESSAGE));

        assert!(form.submit(&api, &session).await.is_err());
        assert_eq!(api.calls(Operation::SignIn), 0);
    }

    #[test]
    fn test_sign_in_has_no_password_policy() {
        assert!(SignInForm::new("ann", "x").validate().is_empty());
    }

    #[test]
    fn test_sign_up_rules() {
        let errors = SignUpForm::new("not-an-email", "", "1234").validate();
        assert_eq!(errors.get("email"), Some(EMAIL_MESSAGE));
        assert_eq!(errors.get("username"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get("password"), Some(MIN_LENGTH_MESSAGE));

        assert!(SignUpForm::new("a@b.com", "ann", "12345").validate().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_success_goes_to_sign_in() {
        let api = FakeContactApi::new();
        api.set_sign_up_success(true);

        let view = SignUpForm::new("a@b.com", "ann", "secret")
            .submit(&api)
            .await
            .unwrap();
        assert_eq!(view, View::SignIn);
    }

    #[tokio::test]
    async fn test_sign_up_rejected_is_error() {
        let api = FakeContactApi::new();
        api.set_sign_up_success(false);

        assert!(SignUpForm::new("a@b.com", "ann", "secret")
            .submit(&api)
            .await
            .is_err());
        assert_eq!(api.calls(Operation::SignUp), 1);
    }

    #[tokio::test]
    async fn test_sign_up_invalid_skips_api() {
        let api = FakeContactApi::new();
        assert!(SignUpForm::new("a@b.com", "ann", "123")
            .submit(&api)
            .await
            .is_err());
        assert_eq!(api.calls(Operation::SignUp), 0);
    }
}
