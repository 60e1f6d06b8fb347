//! Request guards: composable, synchronous checks that run before the
//! storage call and short-circuit the pipeline with a typed [`ApiError`].
//!
//! Handlers invoke these as an explicit ordered list (each call followed by
//! `?`); the first failing guard wins and no further checks run. The
//! storage-backed reference validators live in [`refs`].

pub mod refs;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ApiError;

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

// https://stackoverflow.com/a/32686261/
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// True when the candidate is a well-formed resource id: exactly 24 hex
/// characters. Absent or empty values are invalid, not "not found".
pub fn is_valid_id(candidate: Option<&str>) -> bool {
    match candidate {
        Some(id) if !id.is_empty() => ID_RE.is_match(id),
        _ => false,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Fail unless every named field is present as a key in the request body.
/// Presence is key-existence, not truthiness: an explicit `null` or empty
/// string satisfies the guard.
pub fn require_fields(required: &[&str], body: &Value) -> Result<(), ApiError> {
    require_fields_with_status(required, body, 400)
}

/// Same as [`require_fields`] with an overridden failure status (user
/// registration responds 422 to missing fields).
pub fn require_fields_with_status(
    required: &[&str],
    body: &Value,
    status: u16,
) -> Result<(), ApiError> {
    for field in required {
        let present = body.as_object().map(|map| map.contains_key(*field)).unwrap_or(false);
        if !present {
            return Err(ApiError::missing_field_with_status(*field, status));
        }
    }
    Ok(())
}

/// Fail when the route parameter id or the body id, whichever are present,
/// is not a well-formed resource id.
pub fn validate_id(route_id: Option<&str>, body: &Value) -> Result<(), ApiError> {
    if let Some(id) = route_id {
        if !is_valid_id(Some(id)) {
            return Err(ApiError::invalid_input("Invalid `id` parameter."));
        }
    }
    if let Some(value) = body.get("id") {
        if !value.as_str().map(|id| is_valid_id(Some(id))).unwrap_or(false) {
            return Err(ApiError::invalid_input("Invalid `id` parameter."));
        }
    }
    Ok(())
}

/// Fail unless both the route parameter id and the body id are present and
/// equal. Rejects client bugs where body and URL disagree on which resource
/// is targeted.
pub fn validate_matching_ids(route_id: &str, body: &Value) -> Result<(), ApiError> {
    let body_id = body.get("id").and_then(Value::as_str);
    match body_id {
        Some(body_id) if !route_id.is_empty() && body_id == route_id => Ok(()),
        _ => Err(ApiError::invalid_input(
            "Request body `id` and parameter `id` must be equivalent.",
        )),
    }
}

/// Registration rules: email and password must be strings, the email must
/// have a `local@domain.tld` shape, the password length must be within
/// [8,72] inclusive, and neither may begin or end with whitespace.
pub fn validate_registration(body: &Value) -> Result<(), ApiError> {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::invalid_input("`email` and `password` must be of type string."))
        }
    };

    if !is_valid_email(email) {
        return Err(ApiError::invalid_input("That is not a valid email."));
    }

    let password_len = password.chars().count();
    if !(8..=72).contains(&password_len) {
        return Err(ApiError::invalid_input(
            "Password must be between 8 and 72 characters long.",
        ));
    }

    let untrimmed =
        |s: &str| s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace);
    if untrimmed(email) || untrimmed(password) {
        return Err(ApiError::invalid_input(
            "email and password cannot begin or end with a space.",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_must_be_24_hex_characters() {
        assert!(is_valid_id(Some("000000000000000000000001")));
        assert!(is_valid_id(Some("AbCdEf000000000000000001")));
        assert!(!is_valid_id(Some("faaaaake")));
        assert!(!is_valid_id(Some("00000000000000000000000g")));
        assert!(!is_valid_id(Some("0000000000000000000000010"))); // 25 chars
        assert!(!is_valid_id(Some("")));
        assert!(!is_valid_id(None));
    }

    #[test]
    fn require_fields_checks_key_existence_not_truthiness() {
        let body = json!({ "name": "", "parent": null });
        assert!(require_fields(&["name"], &body).is_ok());
        assert!(require_fields(&["parent"], &body).is_ok());

        let err = require_fields(&["title"], &body).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Missing `title` in request body.");
    }

    #[test]
    fn require_fields_fails_on_first_absent_field() {
        let body = json!({ "email": "a@b.com" });
        let err =
            require_fields_with_status(&["email", "password", "firstName"], &body, 422)
                .unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.message(), "Missing `password` in request body.");
    }

    #[test]
    fn validate_id_accepts_absent_ids() {
        assert!(validate_id(None, &json!({})).is_ok());
    }

    #[test]
    fn validate_id_rejects_malformed_route_or_body_id() {
        assert!(validate_id(Some("nope"), &json!({})).is_err());
        assert!(validate_id(None, &json!({ "id": "nope" })).is_err());
        assert!(validate_id(None, &json!({ "id": 42 })).is_err());
        assert!(validate_id(
            Some("000000000000000000000001"),
            &json!({ "id": "000000000000000000000002" })
        )
        .is_ok());
    }

    #[test]
    fn matching_ids_requires_both_present_and_equal() {
        let id = "000000000000000000000001";
        assert!(validate_matching_ids(id, &json!({ "id": id })).is_ok());
        assert!(validate_matching_ids(id, &json!({})).is_err());
        assert!(validate_matching_ids(id, &json!({ "id": "000000000000000000000002" })).is_err());
    }

    #[test]
    fn registration_requires_string_email_and_password() {
        let err = validate_registration(&json!({ "email": 42, "password": "longenough" }))
            .unwrap_err();
        assert_eq!(err.message(), "`email` and `password` must be of type string.");
    }

    #[test]
    fn registration_rejects_malformed_email() {
        let err = validate_registration(&json!({ "email": "not-an-email", "password": "longenough" }))
            .unwrap_err();
        assert_eq!(err.message(), "That is not a valid email.");
    }

    #[test]
    fn registration_password_length_boundaries() {
        let body = |pw: &str| json!({ "email": "a@b.com", "password": pw });
        assert!(validate_registration(&body("1234567")).is_err()); // 7: too short
        assert!(validate_registration(&body("12345678")).is_ok()); // 8: boundary
        assert!(validate_registration(&body(&"x".repeat(72))).is_ok()); // 72: boundary
        assert!(validate_registration(&body(&"x".repeat(73))).is_err()); // 73: too long
    }

    #[test]
    fn registration_rejects_leading_or_trailing_whitespace() {
        // The email regex already refuses embedded whitespace; a padded
        // password gets the dedicated message.
        assert!(validate_registration(&json!({ "email": " a@b.com ", "password": "12345678" }))
            .is_err());
        let err = validate_registration(&json!({ "email": "a@b.com", "password": " 12345678" }))
            .unwrap_err();
        assert_eq!(err.message(), "email and password cannot begin or end with a space.");
    }
}
