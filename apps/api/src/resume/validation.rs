use thiserror::Error;
use validator::ValidateEmail;

use crate::models::{filled, PersonalInfo};

/// Submit-time problems with the personal info block. Editing never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please enter your full name!")]
    MissingName,
    #[error("Please enter your email!")]
    MissingEmail,
    #[error("Please enter a valid email!")]
    InvalidEmail,
}

/// Collects every submit-time failure so the form can flag all fields at once.
pub fn check_submit(info: &PersonalInfo) -> Vec<SubmitError> {
    let mut errors = Vec::new();

    if filled(&info.name).is_none() {
        errors.push(SubmitError::MissingName);
    }

    match filled(&info.email) {
        None => errors.push(SubmitError::MissingEmail),
        Some(email) if !email.to_string().validate_email() => {
            errors.push(SubmitError::InvalidEmail)
        }
        Some(_) => {}
    }

    errors
}

/// Joins all failures into one message, or `Ok` when the block is submittable.
pub fn validate_for_submit(info: &PersonalInfo) -> Result<(), String> {
    let errors = check_submit(info);
    if errors.is_empty() {
        return Ok(());
    }
    Err(errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: Option<&str>, email: Option<&str>) -> PersonalInfo {
        PersonalInfo {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_info_passes() {
        assert!(check_submit(&info(Some("Ada Lovelace"), Some("ada@example.com"))).is_empty());
        assert!(validate_for_submit(&info(Some("Ada"), Some("ada@example.com"))).is_ok());
    }

    #[test]
    fn test_missing_name_and_email() {
        let errors = check_submit(&info(None, Some("   ")));
        assert_eq!(errors, vec![SubmitError::MissingName, SubmitError::MissingEmail]);
    }

    #[test]
    fn test_malformed_email() {
        let errors = check_submit(&info(Some("Ada"), Some("ada-at-example")));
        assert_eq!(errors, vec![SubmitError::InvalidEmail]);
    }

    #[test]
    fn test_email_is_trimmed_before_check() {
        assert!(check_submit(&info(Some("Ada"), Some("  ada@example.com "))).is_empty());
    }

    #[test]
    fn test_message_joins_all_failures() {
        let message = validate_for_submit(&info(None, None)).unwrap_err();
        assert!(message.contains("full name"));
        assert!(message.contains("email"));
    }

    #[test]
    fn test_other_fields_are_never_required() {
        let mut full = info(Some("Ada"), Some("ada@example.com"));
        full.phone = None;
        full.website = Some(String::new());
        assert!(check_submit(&full).is_empty());
    }
}
