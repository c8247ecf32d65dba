//! Credential input validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length in bytes, counted after trimming
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt only reads this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a valid format (after normalization)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&normalize_email(email))
}

/// Check if a password meets the minimum length
pub fn is_valid_password(password: &str) -> bool {
    password.trim().len() >= MIN_PASSWORD_LENGTH
}

/// Check if a password is longer than bcrypt can hash without truncating
pub fn is_password_too_long(password: &str) -> bool {
    password.len() > MAX_PASSWORD_BYTES
}
