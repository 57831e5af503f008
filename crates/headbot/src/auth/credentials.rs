//! Login credentials type.

use std::fmt;

/// Login credentials for the Headbot API.
///
/// Holds the account email and password handed to the login endpoint.
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use headbot::Credentials;
///
/// let creds = Credentials::new("vasya.pupkin@gmail.com", "abc123");
/// assert_eq!(creds.email(), "vasya.pupkin@gmail.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Use only when constructing the login request.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("vasya.pupkin@gmail.com", "abc123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("vasya.pupkin@gmail.com"));
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
