//! Local credential checks for the login and registration forms.

use thiserror::Error;

/// Minimum username length at registration.
pub const MIN_USERNAME_LEN: usize = 6;

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A form field that failed its local check.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Username is a required field")]
    UsernameRequired,

    #[error("Username must be at least 6 characters")]
    UsernameTooShort,

    #[error("Password is a required field")]
    PasswordRequired,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be present.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.username.is_empty() {
            return Err(CredentialError::UsernameRequired);
        }
        if self.password.is_empty() {
            return Err(CredentialError::PasswordRequired);
        }
        Ok(())
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check the fields in form order, stopping at the first failure.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.username.is_empty() {
            return Err(CredentialError::UsernameRequired);
        }
        if self.username.chars().count() < MIN_USERNAME_LEN {
            return Err(CredentialError::UsernameTooShort);
        }
        if self.password.is_empty() {
            return Err(CredentialError::PasswordRequired);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(CredentialError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("", "").validate(),
            Err(CredentialError::UsernameRequired)
        );
        assert_eq!(
            LoginForm::new("crio.do", "").validate(),
            Err(CredentialError::PasswordRequired)
        );
        // Login has no length rule.
        assert!(LoginForm::new("ab", "cd").validate().is_ok());
    }

    #[test]
    fn test_registration_checks_in_order() {
        let cases = [
            (("", "", "x"), CredentialError::UsernameRequired),
            (("crio", "", ""), CredentialError::UsernameTooShort),
            (("crio.do", "", ""), CredentialError::PasswordRequired),
            (("crio.do", "12345", "12345"), CredentialError::PasswordTooShort),
            (("crio.do", "123456", "1234567"), CredentialError::PasswordMismatch),
        ];
        for ((user, pass, confirm), expected) in cases {
            assert_eq!(
                RegistrationForm::new(user, pass, confirm).validate(),
                Err(expected),
                "for {user:?}/{pass:?}/{confirm:?}"
            );
        }
        assert!(RegistrationForm::new("crio.do", "learnbydoing", "learnbydoing")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CredentialError::UsernameTooShort.to_string(),
            "Username must be at least 6 characters"
        );
        assert_eq!(CredentialError::PasswordMismatch.to_string(), "Passwords do not match");
    }
}
