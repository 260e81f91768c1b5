//! Input validation rules for registration and resource names.
//!
//! All rules return `Err` with the exact human-facing message the API
//! surfaces; handlers wrap them in [`CoreError::Validation`](crate::error::CoreError).

/// Password policy: at least 8 characters with one uppercase letter, one
/// lowercase letter, and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err("Weak password. Make sure password contains at least 8 characters, \
             an uppercase letter, a lowercase letter, and a digit"
            .to_string())
    }
}

/// Minimal email sanity check: non-blank and shaped like `local@domain`.
///
/// Deliverability is not verified; the rule exists to reject obviously
/// malformed handles before they become unique-key values.
pub fn validate_email(email: &str) -> Result<(), String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("Email or password cannot be blank".to_string());
    }
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(format!("{trimmed} is not a valid email address"));
    }
    Ok(())
}

/// Name rules shared by bucketlists and their items: non-blank after
/// trimming, and not a string consisting solely of digits.
///
/// `entity` names the offending field in the message (e.g. `"Bucketlist"`).
pub fn validate_resource_name(entity: &str, name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(format!("{entity} name cannot be blank"));
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{entity} name cannot be purely numeric"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy_rejects_each_missing_class() {
        // no uppercase, no digit
        assert!(validate_password_strength("password").is_err());
        // no lowercase
        assert!(validate_password_strength("PASSWORD01").is_err());
        // no digit
        assert!(validate_password_strength("Passwords").is_err());
        // too short
        assert!(validate_password_strength("Pass01").is_err());
    }

    #[test]
    fn test_password_policy_accepts_compliant() {
        assert!(validate_password_strength("Password01").is_ok());
        assert!(validate_password_strength("Qwerty03").is_ok());
    }

    #[test]
    fn test_password_message_names_the_rules() {
        let msg = validate_password_strength("password").unwrap_err();
        assert!(msg.contains("at least 8 characters"));
        assert!(msg.contains("uppercase"));
        assert!(msg.contains("digit"));
    }

    #[test]
    fn test_email_blank_and_malformed() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("alice@example.com").is_ok());
    }

    #[test]
    fn test_resource_name_rules() {
        assert!(validate_resource_name("Bucketlist", "Travel").is_ok());
        assert!(validate_resource_name("Bucketlist", "Top 10 hikes").is_ok());

        let blank = validate_resource_name("Bucketlist", "   ").unwrap_err();
        assert_eq!(blank, "Bucketlist name cannot be blank");

        let numeric = validate_resource_name("Item", "12345").unwrap_err();
        assert_eq!(numeric, "Item name cannot be purely numeric");
    }
}
