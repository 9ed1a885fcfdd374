//! Client configuration.

use serde::Deserialize;
use std::fmt;

use crate::auth::Credentials;
use crate::error::Error;
use crate::types::{BaseUrl, Scheme};

/// Default management port of the recorder's web interface.
pub const DEFAULT_PORT: u16 = 8080;

/// Connection settings for a [`Client`](crate::Client).
///
/// Built in code, or deserialized by the embedding application from its own
/// configuration source. `scheme` and `port` may be omitted.
///
/// # Example
///
/// ```
/// use qvrpro::{ClientConfig, Scheme};
///
/// let config = ClientConfig::new("admin", "secret", "10.7.7.100")
///     .with_scheme(Scheme::Https)
///     .with_port(443);
/// assert_eq!(config.port(), 443);
/// ```
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    user: String,
    password: String,
    host: String,
    #[serde(default)]
    scheme: Scheme,
    #[serde(default = "default_port")]
    port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl ClientConfig {
    /// Create a configuration using plain HTTP on the default port.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            scheme: Scheme::default(),
            port: DEFAULT_PORT,
        }
    }

    /// Use a different transport scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Use a different port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn credentials(&self) -> Credentials {
        Credentials::new(&self.user, &self.password)
    }

    /// Validate host, scheme and port into a [`BaseUrl`].
    pub fn base_url(&self) -> Result<BaseUrl, Error> {
        BaseUrl::new(self.scheme, &self.host, self.port)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_http_on_8080() {
        let config = ClientConfig::new("admin", "secret", "10.7.7.100");
        assert_eq!(config.scheme(), Scheme::Http);
        assert_eq!(config.port(), 8080);
        assert_eq!(
            config.base_url().unwrap().endpoint_url("/qvrentry"),
            "http://10.7.7.100:8080/qvrentry"
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "user": "admin",
            "password": "secret",
            "host": "nvr.local"
        }))
        .unwrap();
        assert_eq!(config.scheme(), Scheme::Http);
        assert_eq!(config.port(), DEFAULT_PORT);
    }

    #[test]
    fn deserializes_explicit_scheme_and_port() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "user": "admin",
            "password": "secret",
            "host": "nvr.local",
            "scheme": "https",
            "port": 8443
        }))
        .unwrap();
        assert_eq!(config.scheme(), Scheme::Https);
        assert_eq!(config.port(), 8443);
    }

    #[test]
    fn config_hides_password_in_debug() {
        let config = ClientConfig::new("admin", "hunter2", "nvr.local");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
