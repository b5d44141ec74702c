use std::fmt;

use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password rules shared by sign-up and password reset, in the order they are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRequirement {
    MinLength,
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        PasswordRequirement::MinLength,
        PasswordRequirement::Lowercase,
        PasswordRequirement::Uppercase,
        PasswordRequirement::Digit,
        PasswordRequirement::Symbol,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            PasswordRequirement::MinLength => "At least 8 characters",
            PasswordRequirement::Lowercase => "At least one lowercase letter",
            PasswordRequirement::Uppercase => "At least one uppercase letter",
            PasswordRequirement::Digit => "At least one number",
            PasswordRequirement::Symbol => "At least one symbol",
        }
    }

    fn is_met_by(&self, password: &str) -> bool {
        match self {
            // UTF-16 code units, matching how browsers measure the form field
            PasswordRequirement::MinLength => {
                password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
            }
            PasswordRequirement::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRequirement::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRequirement::Digit => password.chars().any(|c| c.is_ascii_digit()),
            // anything outside [A-Za-z0-9], including non-ASCII letters
            PasswordRequirement::Symbol => password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }
}

impl fmt::Display for PasswordRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Returns every requirement the password fails. Empty means acceptable.
pub fn validate_password(password: &str) -> Vec<PasswordRequirement> {
    PasswordRequirement::ALL
        .into_iter()
        .filter(|requirement| !requirement.is_met_by(password))
        .collect()
}

#[derive(Debug, Error, PartialEq)]
pub enum PasswordResetError {
    #[error("Passwords do not match")]
    Mismatch,

    #[error("Password doesn't meet requirements")]
    Weak(Vec<PasswordRequirement>),
}

/// Checks a new password and its confirmation the way the reset form does:
/// the confirmation must match before strength is considered.
pub fn validate_password_reset(
    password: &str,
    confirmation: &str,
) -> Result<(), PasswordResetError> {
    if password != confirmation {
        return Err(PasswordResetError::Mismatch);
    }

    let unmet = validate_password(password);
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(PasswordResetError::Weak(unmet))
    }
}
