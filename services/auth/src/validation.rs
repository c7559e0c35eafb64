//! Input validation utilities
//!
//! Registration input is checked here, before any password is hashed. The
//! upper bounds mirror the `users` column sizes.

/// Maximum username length, matching `users.username`
const USERNAME_MAX_CHARS: usize = 50;

/// Maximum email length, matching `users.email`
const EMAIL_MAX_CHARS: usize = 100;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    let length = username.chars().count();
    if length < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }

    if length > USERNAME_MAX_CHARS {
        return Err(format!(
            "Username must be at most {} characters",
            USERNAME_MAX_CHARS
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() || !email.contains('@') {
        return Err("Invalid email address".to_string());
    }

    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(format!(
            "Email must be at most {} characters",
            EMAIL_MAX_CHARS
        ));
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }

    Ok(())
}

/// Validate a full registration request, reporting the first problem found
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), String> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("cross_stitcher_42").is_ok());
        assert_eq!(
            validate_username("ab").unwrap_err(),
            "Username must be at least 3 characters"
        );
        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
        assert!(validate_username(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_username_allows_punctuation() {
        assert!(validate_username("jane.doe").is_ok());
        assert!(validate_username("mary-ann").is_ok());
        assert!(validate_username("zoë").is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice@localhost").is_ok());
        assert_eq!(
            validate_email("invalid-email").unwrap_err(),
            "Invalid email address"
        );
        assert!(validate_email("").is_err());
        let long = format!("{}@example.com", "a".repeat(90));
        assert_eq!(
            validate_email(&long).unwrap_err(),
            "Email must be at most 100 characters"
        );
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("password123").is_ok());
        assert_eq!(
            validate_password("short").unwrap_err(),
            "Password must be at least 8 characters"
        );
        assert!(validate_password("").is_err());
        assert!(validate_password(&"p".repeat(200)).is_ok());
    }

    #[test]
    fn test_registration_reports_first_problem() {
        assert!(validate_registration("alice", "alice@example.com", "password123").is_ok());
        assert!(validate_registration("jane.doe", "jane@localhost", &"p".repeat(200)).is_ok());
        assert_eq!(
            validate_registration("ab", "invalid", "short").unwrap_err(),
            "Username must be at least 3 characters"
        );
        assert_eq!(
            validate_registration("alice", "invalid", "short").unwrap_err(),
            "Invalid email address"
        );
    }
}
