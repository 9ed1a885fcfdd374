//! Login credentials type.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Login credentials for a recorder account.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use qvrpro::Credentials;
///
/// let creds = Credentials::new("admin", "secret");
/// assert_eq!(creds.user(), "admin");
/// ```
#[derive(Clone)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the account name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password as the login endpoint expects it: standard base64.
    pub(crate) fn encoded_password(&self) -> String {
        STANDARD.encode(self.password.as_bytes())
    }

    /// Returns `user:password`, the form used when embedding credentials in
    /// stream URLs.
    pub fn auth_string(&self) -> String {
        format!("{}:{}", self.user, self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("qvruser", "!qvrtest123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("qvruser"));
        assert!(!debug.contains("!qvrtest123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn password_is_base64_encoded() {
        let creds = Credentials::new("qvruser", "!qvrtest123");
        assert_eq!(creds.encoded_password(), "IXF2cnRlc3QxMjM=");
    }

    #[test]
    fn auth_string_joins_user_and_password() {
        let creds = Credentials::new("admin", "pw");
        assert_eq!(creds.auth_string(), "admin:pw");
    }
}
