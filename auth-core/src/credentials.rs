use regex::Regex;
use thiserror::Error;

/// Signup credential policy.
///
/// Checks email shape and password strength before an account is created.
/// Email is checked before password; the first failing check is the one
/// reported.
pub struct CredentialValidator {
    email_pattern: Regex,
}

/// Error type for credential validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password must be at least {min} characters long")]
    WeakPassword { min: usize },
}

impl CredentialValidator {
    /// Minimum password length in characters.
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Accepted email shape: ASCII word characters, dots, and hyphens in
    /// the local part and domain, with a TLD of 2+ letters.
    const EMAIL_PATTERN: &'static str = r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z]{2,}$";

    /// Create a validator with the standard policy.
    pub fn new() -> Self {
        Self {
            email_pattern: Regex::new(Self::EMAIL_PATTERN).expect("email pattern is a valid regex"),
        }
    }

    /// Validate a signup email/password pair.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Email does not match the accepted shape
    /// * `WeakPassword` - Password is shorter than the minimum length
    pub fn validate(&self, email: &str, password: &str) -> Result<(), CredentialError> {
        if !self.email_pattern.is_match(email) {
            return Err(CredentialError::InvalidEmailFormat);
        }

        if password.chars().count() < Self::MIN_PASSWORD_LENGTH {
            return Err(CredentialError::WeakPassword {
                min: Self::MIN_PASSWORD_LENGTH,
            });
        }

        Ok(())
    }
}

impl Default for CredentialValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let validator = CredentialValidator::new();

        assert!(validator.validate("alice@example.com", "password123").is_ok());
        assert!(validator.validate("a.b-c_d@mail.example.org", "12345678").is_ok());
        assert!(validator.validate("ALICE@EXAMPLE.IO", "longenoughpassword").is_ok());
    }

    #[test]
    fn test_invalid_email_shapes() {
        let validator = CredentialValidator::new();

        for email in [
            "",
            "plainaddress",
            "missing-domain@",
            "@missing-local.com",
            "no-tld@example",
            "one-letter-tld@example.c",
            "digit-tld@example.c0m",
            "spaces in@example.com",
            "ünïcode@example.com",
        ] {
            assert_eq!(
                validator.validate(email, "password123"),
                Err(CredentialError::InvalidEmailFormat),
                "expected rejection for {email:?}"
            );
        }
    }

    #[test]
    fn test_weak_password() {
        let validator = CredentialValidator::new();

        assert_eq!(
            validator.validate("alice@example.com", "short"),
            Err(CredentialError::WeakPassword { min: 8 })
        );
        assert_eq!(
            validator.validate("alice@example.com", "1234567"),
            Err(CredentialError::WeakPassword { min: 8 })
        );
    }

    #[test]
    fn test_password_length_counts_codepoints() {
        let validator = CredentialValidator::new();

        // 8 codepoints, more than 8 bytes
        assert!(validator.validate("alice@example.com", "pässwörd").is_ok());
    }

    #[test]
    fn test_email_checked_before_password() {
        let validator = CredentialValidator::new();

        // Both checks would fail; the email failure wins.
        assert_eq!(
            validator.validate("not-an-email", "short"),
            Err(CredentialError::InvalidEmailFormat)
        );
    }
}
