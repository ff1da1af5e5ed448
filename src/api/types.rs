//! Wire types for the contacts API
//!
//! Field names follow the server's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Server-assigned contact identifier
pub type ContactId = i64;

/// A single contact as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Server-assigned id, immutable after creation
    pub id: ContactId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Phone number, free-form
    pub phone_number: String,
    /// Email address
    pub email: String,
    /// Postal address, free-form
    pub address: String,
    /// Free-form note
    pub note: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`
///
/// `access_token` is optional so a malformed success response can be
/// detected instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/register`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_uses_camel_case() {
        let json = serde_json::json!({
            "id": 7,
            "firstName": "Ann",
            "lastName": "Lee",
            "phoneNumber": "555-0100",
            "email": "ann@example.com",
            "address": "1 Main St",
            "note": "met at conf"
        });
        let contact: Contact = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(contact.id, 7);
        assert_eq!(contact.first_name, "Ann");
        assert_eq!(serde_json::to_value(&contact).unwrap(), json);
    }

    #[test]
    fn test_sign_in_response_without_token() {
        let response: SignInResponse = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert_eq!(response.access_token, None);
    }

    #[test]
    fn test_sign_in_response_with_token() {
        let response: SignInResponse =
            serde_json::from_str(r#"{"accessToken":"abc123"}"#).unwrap();
        assert_eq!(response.access_token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_sign_up_response_defaults_to_failure() {
        let response: SignUpResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
    }
}
