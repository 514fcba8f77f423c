//! Sign-in and sign-up form handling.
//!
//! Normalizes what the visitor typed before anything is sent to the
//! authority, and rejects incomplete forms locally.

use crate::authority::types::{AuthError, LoginRequest, RegisterRequest, User};

/// Phone numbers are capped at this many digits while typing.
pub const PHONE_MAX_DIGITS: usize = 10;
const PHONE_GROUP_SPLIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if email or password is empty.
    pub fn to_request(&self) -> Result<LoginRequest, AuthError> {
        Ok(LoginRequest { email: required(&self.email, "Email")?, password: required_secret(&self.password)? })
    }

    /// What the visitor typed, used where the authority's reply leaves gaps.
    #[must_use]
    pub fn typed_user(&self) -> User {
        User { id: None, username: String::new(), email: optional(self.email.trim()), phone: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if name, email, or password is empty.
    pub fn to_request(&self) -> Result<RegisterRequest, AuthError> {
        Ok(RegisterRequest {
            username: required(&self.username, "Name")?,
            email: required(&self.email, "Email")?,
            password: required_secret(&self.password)?,
            phone: digits_only(&self.phone),
        })
    }

    #[must_use]
    pub fn typed_user(&self) -> User {
        User {
            id: None,
            username: self.username.trim().to_owned(),
            email: optional(self.email.trim()),
            phone: optional(&digits_only(&self.phone)),
        }
    }
}

/// Live formatting for the phone field: digits only, at most ten, with a
/// dash after the fifth (`12345-67890`).
#[must_use]
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(PHONE_MAX_DIGITS).collect();
    if digits.len() <= PHONE_GROUP_SPLIT {
        return digits;
    }
    let (head, tail) = digits.split_at(PHONE_GROUP_SPLIT);
    format!("{head}-{tail}")
}

/// Strip everything but ASCII digits.
#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn required(value: &str, field: &str) -> Result<String, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

// Passwords are sent exactly as typed.
fn required_secret(value: &str) -> Result<String, AuthError> {
    if value.is_empty() {
        return Err(AuthError::InvalidInput("Password is required".into()));
    }
    Ok(value.to_owned())
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
