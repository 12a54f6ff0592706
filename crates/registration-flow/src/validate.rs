//! Client-side form validation.

use crate::form::{Field, RegistrationForm, ValidationErrors};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate the whole form ahead of submission.
///
/// Pure function over the form and the phone-verification outcome.
/// Returns an empty set iff every rule passes; messages are keyed by the
/// field they belong to.
pub fn validate(form: &RegistrationForm, phone_verified: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.set(Field::Name, "Enter your name");
    }

    if form.email.trim().is_empty() {
        errors.set(Field::Email, "Enter your email address");
    } else if !is_valid_email(form.email.trim()) {
        errors.set(Field::Email, "Enter a valid email address");
    }

    if form.password.is_empty() {
        errors.set(Field::Password, "Enter a password");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.set(Field::Password, "Password must be at least 8 characters");
    }

    if form.confirm_password.is_empty() {
        errors.set(Field::ConfirmPassword, "Confirm your password");
    } else if form.confirm_password != form.password {
        errors.set(Field::ConfirmPassword, "Passwords do not match");
    }

    if form.phone.trim().is_empty() {
        errors.set(Field::Phone, "Enter your mobile number");
    } else if !is_valid_phone(form.phone.trim()) {
        errors.set(Field::Phone, "Enter a valid mobile number, e.g. 010-1234-5678");
    } else if !phone_verified {
        errors.set(Field::Phone, "Verify your mobile number before signing up");
    }

    if !form.agree_terms {
        errors.set(Field::AgreeTerms, "You must accept the terms of service");
    }

    if !form.agree_privacy {
        errors.set(Field::AgreePrivacy, "You must accept the privacy policy");
    }

    errors
}

/// Basic `local@domain.tld` email shape. No whitespace, a single `@`,
/// and a dotted domain with a non-empty label on both sides.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }

    if domain.contains('@') || domain.contains(char::is_whitespace) {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Korean mobile number shape: `01X`, then two groups of four digits,
/// each group optionally preceded by a dash (`^01[0-9]-?[0-9]{4}-?[0-9]{4}$`).
pub fn is_valid_phone(phone: &str) -> bool {
    let chars: Vec<char> = phone.chars().collect();

    if chars.len() < 3 || chars[0] != '0' || chars[1] != '1' || !chars[2].is_ascii_digit() {
        return false;
    }

    let rest = take_digit_group(&chars[3..]).and_then(take_digit_group);

    matches!(rest, Some(rem) if rem.is_empty())
}

/// Consume an optional dash followed by exactly four digits.
fn take_digit_group(chars: &[char]) -> Option<&[char]> {
    let chars = match chars.first() {
        Some('-') => &chars[1..],
        _ => chars,
    };

    if chars.len() >= 4 && chars[..4].iter().all(char::is_ascii_digit) {
        Some(&chars[4..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Hong Gildong".into(),
            email: "hong@example.com".into(),
            password: "sup3rsecret".into(),
            confirm_password: "sup3rsecret".into(),
            phone: "010-1234-5678".into(),
            agree_terms: true,
            agree_privacy: true,
            agree_marketing: false,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let errors = validate(&valid_form(), true);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let errors = validate(&RegistrationForm::default(), false);

        for field in [
            Field::Name,
            Field::Email,
            Field::Password,
            Field::ConfirmPassword,
            Field::Phone,
            Field::AgreeTerms,
            Field::AgreePrivacy,
        ] {
            assert!(errors.get(field).is_some(), "expected error for {}", field);
        }
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let mut form = valid_form();
        form.email = "bad-email".into();

        let errors = validate(&form, true);
        assert_eq!(errors.get(Field::Email), Some("Enter a valid email address"));
    }

    #[test]
    fn test_minimal_email_is_accepted() {
        let mut form = valid_form();
        form.email = "a@b.com".into();

        let errors = validate(&form, true);
        assert!(errors.get(Field::Email).is_none());
    }

    #[test]
    fn test_short_password() {
        let mut form = valid_form();
        form.password = "short".into();
        form.confirm_password = "short".into();

        let errors = validate(&form, true);
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = valid_form();
        form.confirm_password = "different1".into();

        let errors = validate(&form, true);
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_unverified_phone_blocks_submission() {
        let errors = validate(&valid_form(), false);
        assert_eq!(
            errors.get(Field::Phone),
            Some("Verify your mobile number before signing up")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_marketing_consent_is_optional() {
        let mut form = valid_form();
        form.agree_marketing = false;
        assert!(validate(&form, true).is_empty());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.co.kr"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@ex ample.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_valid_phone("010-1234-5678"));
        assert!(is_valid_phone("01012345678"));
        assert!(is_valid_phone("0111234-5678"));
        assert!(is_valid_phone("019-12345678"));

        assert!(!is_valid_phone("02-1234-5678"));
        assert!(!is_valid_phone("010-123-5678"));
        assert!(!is_valid_phone("010-1234-567"));
        assert!(!is_valid_phone("010-1234-56789"));
        assert!(!is_valid_phone("010 1234 5678"));
        assert!(!is_valid_phone("+82-10-1234-5678"));
        assert!(!is_valid_phone(""));
    }
}
