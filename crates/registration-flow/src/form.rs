//! Registration form data and per-field validation errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The in-progress registration form.
///
/// Serialized with camelCase keys so the persisted draft matches the
/// site's session storage format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub agree_terms: bool,
    pub agree_privacy: bool,
    pub agree_marketing: bool,
}

impl RegistrationForm {
    /// True when any textual field holds user input. Drives the
    /// "restored" notice; agreement checkboxes alone don't count.
    pub fn has_text(&self) -> bool {
        !self.name.is_empty()
            || !self.email.is_empty()
            || !self.password.is_empty()
            || !self.confirm_password.is_empty()
            || !self.phone.is_empty()
    }
}

/// The persisted draft: the whole form plus when it was last saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(flatten)]
    pub form: RegistrationForm,

    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

/// A form field an error or an update can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Phone,
    VerificationCode,
    AgreeTerms,
    AgreePrivacy,
    AgreeMarketing,
    /// Whole-form failures not attributable to a single field.
    General,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Phone => "phone",
            Field::VerificationCode => "verificationCode",
            Field::AgreeTerms => "agreeTerms",
            Field::AgreePrivacy => "agreePrivacy",
            Field::AgreeMarketing => "agreeMarketing",
            Field::General => "form",
        };
        f.write_str(name)
    }
}

/// An update to a single form field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Human-readable validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_serializes_camel_case() {
        let form = RegistrationForm {
            name: "Hong Gildong".into(),
            confirm_password: "sup3rsecret".into(),
            agree_terms: true,
            ..Default::default()
        };

        let json = serde_json::to_string(&form).unwrap();

        assert!(json.contains("\"confirmPassword\":\"sup3rsecret\""));
        assert!(json.contains("\"agreeTerms\":true"));
        assert!(json.contains("\"agreeMarketing\":false"));
    }

    #[test]
    fn test_form_round_trip() {
        let form = RegistrationForm {
            name: "Hong Gildong".into(),
            email: "hong@example.com".into(),
            password: "sup3rsecret".into(),
            confirm_password: "sup3rsecret".into(),
            phone: "010-1234-5678".into(),
            agree_terms: true,
            agree_privacy: true,
            agree_marketing: false,
        };

        let json = serde_json::to_string(&form).unwrap();
        let restored: RegistrationForm = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, form);
    }

    #[test]
    fn test_form_deserializes_partial_draft() {
        // Older drafts may miss fields entirely
        let json = r#"{"name":"Hong","email":"hong@example.com"}"#;
        let form: RegistrationForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.name, "Hong");
        assert!(form.password.is_empty());
        assert!(!form.agree_terms);
    }

    #[test]
    fn test_draft_round_trip_preserves_form() {
        let draft = Draft {
            form: RegistrationForm {
                phone: "010-1234-5678".into(),
                ..Default::default()
            },
            saved_at: Utc::now(),
        };

        let json = serde_json::to_string(&draft).unwrap();
        let restored: Draft = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.form, draft.form);
    }

    #[test]
    fn test_draft_without_saved_at_still_parses() {
        let json = r#"{"name":"Hong"}"#;
        let draft: Draft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.form.name, "Hong");
    }

    #[test]
    fn test_has_text() {
        let mut form = RegistrationForm::default();
        assert!(!form.has_text());

        form.agree_terms = true;
        assert!(!form.has_text());

        form.email = "hong@example.com".into();
        assert!(form.has_text());
    }

    #[test]
    fn test_validation_errors_set_and_clear() {
        let mut errors = ValidationErrors::default();
        assert!(errors.is_empty());

        errors.set(Field::Email, "Enter a valid email address");
        errors.set(Field::Phone, "Enter your mobile number");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email), Some("Enter a valid email address"));

        errors.clear(Field::Email);
        assert!(errors.get(Field::Email).is_none());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::ConfirmPassword.to_string(), "confirmPassword");
        assert_eq!(Field::General.to_string(), "form");
    }
}
