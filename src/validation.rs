//! Per-field presence and shape checks applied to request bodies.
//!
//! Checks never short-circuit: every failing field contributes one message, in
//! the order the fields are declared. Field values must be JSON strings.

use serde_json::Value;

/// A body key with the label used in messages
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    pub key: &'static str,
    pub label: &'static str,
}

pub const USER_FIELDS: &[RequiredField] = &[
    RequiredField { key: "firstName", label: "First Name" },
    RequiredField { key: "lastName", label: "Last Name" },
    RequiredField { key: "emailAddress", label: "Email Address" },
    RequiredField { key: "password", label: "Password" },
];

pub const COURSE_FIELDS: &[RequiredField] = &[
    RequiredField { key: "title", label: "Title" },
    RequiredField { key: "description", label: "Description" },
];

/// Optional course keys; when present they must be a string or null
pub const OPTIONAL_COURSE_FIELDS: &[RequiredField] = &[
    RequiredField { key: "estimatedTime", label: "Estimated Time" },
    RequiredField { key: "materialsNeeded", label: "Materials Needed" },
];

pub fn missing_value_message(label: &str) -> String {
    format!("Please provide a value for \"{}\"", label)
}

pub fn not_text_message(label: &str) -> String {
    format!("Please provide text for \"{}\"", label)
}

/// One message per required field: absent, null, or blank values are missing;
/// numbers, booleans, arrays, and objects are not text.
pub fn missing_fields(body: &Value, fields: &[RequiredField]) -> Vec<String> {
    fields
        .iter()
        .filter_map(|field| match body.get(field.key) {
            None | Some(Value::Null) => Some(missing_value_message(field.label)),
            Some(Value::String(s)) if s.trim().is_empty() => Some(missing_value_message(field.label)),
            Some(Value::String(_)) => None,
            Some(_) => Some(not_text_message(field.label)),
        })
        .collect()
}

/// One message per optional field that is present but neither a string nor null
pub fn non_text_fields(body: &Value, fields: &[RequiredField]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| !matches!(body.get(field.key), None | Some(Value::Null) | Some(Value::String(_))))
        .map(|field| not_text_message(field.label))
        .collect()
}

/// Registration checks: presence of every user field, then email shape
pub fn validate_new_user(body: &Value) -> Vec<String> {
    let mut messages = missing_fields(body, USER_FIELDS);

    if let Some(email) = text(body, "emailAddress") {
        let email = email.trim();
        if !email.is_empty() && !is_email(email) {
            messages.push("Please provide a valid email address for \"Email Address\"".to_string());
        }
    }

    messages
}

pub fn validate_course(body: &Value) -> Vec<String> {
    let mut messages = missing_fields(body, COURSE_FIELDS);
    messages.extend(non_text_fields(body, OPTIONAL_COURSE_FIELDS));
    messages
}

/// String value of `key`; any other JSON type yields `None`
pub fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key)?.as_str().map(str::to_string)
}

/// `None` if `key` is absent, `Some(None)` if it is null or blank, otherwise the text
pub fn optional_text(body: &Value, key: &str) -> Option<Option<String>> {
    body.get(key)?;
    Some(text(body, key).filter(|s| !s.trim().is_empty()))
}

/// Loose email shape check: `local@domain.tld`, no whitespace
pub fn is_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_user_body_passes() {
        let body = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "emailAddress": "ada@x.com",
            "password": "secret"
        });
        assert!(validate_new_user(&body).is_empty());
    }

    #[test]
    fn each_missing_field_yields_one_message_in_declared_order() {
        let body = json!({ "lastName": "Lovelace", "emailAddress": "ada@x.com" });
        assert_eq!(
            validate_new_user(&body),
            vec![
                "Please provide a value for \"First Name\"".to_string(),
                "Please provide a value for \"Password\"".to_string(),
            ]
        );
    }

    #[test]
    fn null_and_blank_values_count_as_missing() {
        let body = json!({ "title": null, "description": "   " });
        assert_eq!(
            validate_course(&body),
            vec![
                "Please provide a value for \"Title\"".to_string(),
                "Please provide a value for \"Description\"".to_string(),
            ]
        );
    }

    #[test]
    fn non_object_body_fails_every_field() {
        assert_eq!(validate_course(&json!("just a string")).len(), COURSE_FIELDS.len());
        assert_eq!(validate_new_user(&Value::Null).len(), USER_FIELDS.len());
    }

    #[test]
    fn non_string_values_are_not_text() {
        let body = json!({ "title": 101, "description": true });
        assert_eq!(
            validate_course(&body),
            vec![
                "Please provide text for \"Title\"".to_string(),
                "Please provide text for \"Description\"".to_string(),
            ]
        );
        assert_eq!(text(&body, "title"), None);

        let body = json!({ "title": ["a"], "description": { "x": 1 } });
        assert_eq!(validate_course(&body).len(), 2);

        let body = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "emailAddress": "ada@x.com",
            "password": false
        });
        assert_eq!(validate_new_user(&body), vec!["Please provide text for \"Password\"".to_string()]);
    }

    #[test]
    fn optional_course_fields_must_be_text_or_null() {
        let body = json!({ "title": "T", "description": "D", "estimatedTime": 12, "materialsNeeded": null });
        assert_eq!(validate_course(&body), vec!["Please provide text for \"Estimated Time\"".to_string()]);
    }

    #[test]
    fn malformed_email_is_reported_after_presence_checks() {
        let body = json!({
            "firstName": "Ada",
            "emailAddress": "not-an-email",
            "password": "secret"
        });
        let messages = validate_new_user(&body);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Please provide a value for \"Last Name\"");
        assert!(messages[1].contains("valid email"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("ada@x.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email("ada@x"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("ada@@x.com"));
        assert!(!is_email("ada @x.com"));
        assert!(!is_email("ada@.com"));
        assert!(!is_email("ada@x..com"));
    }

    #[test]
    fn optional_text_distinguishes_absent_from_null() {
        let body = json!({ "estimatedTime": null, "materialsNeeded": "Pencil" });
        assert_eq!(optional_text(&body, "estimatedTime"), Some(None));
        assert_eq!(optional_text(&body, "materialsNeeded"), Some(Some("Pencil".to_string())));
        assert_eq!(optional_text(&body, "nothing"), None);
    }
}
