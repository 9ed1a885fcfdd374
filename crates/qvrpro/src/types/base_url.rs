//! Recorder base URL type.

use std::fmt;
use url::Url;

use super::Scheme;
use crate::error::{Error, InvalidInputError};

/// A validated `{scheme}://{host}:{port}` URL identifying a recorder.
///
/// Endpoint URLs are formed by appending an absolute path to this base.
///
/// # Example
///
/// ```
/// use qvrpro::{BaseUrl, Scheme};
///
/// let base = BaseUrl::new(Scheme::Http, "10.7.7.100", 8080).unwrap();
/// assert_eq!(base.endpoint_url("/qvrentry"), "http://10.7.7.100:8080/qvrentry");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Build a base URL from its parts, validating the result.
    ///
    /// Bare IPv6 addresses are bracketed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty or the parts do not form a
    /// plain origin (no path, query or credentials).
    pub fn new(scheme: Scheme, host: &str, port: u16) -> Result<Self, Error> {
        let host = host.trim();
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        let raw = format!("{}://{}:{}", scheme, host, port);

        let invalid = |reason: &str| InvalidInputError::BaseUrl {
            value: raw.clone(),
            reason: reason.to_string(),
        };

        if host.is_empty() {
            return Err(invalid("host is empty").into());
        }

        let url = Url::parse(&raw).map_err(|e| invalid(&e.to_string()))?;

        if url.host_str().is_none() {
            return Err(invalid("missing host").into());
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("host must not contain a path or query").into());
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid("host must not contain credentials").into());
        }

        Ok(Self(url))
    }

    /// Returns the full URL for an absolute endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        // Url always renders a root path as a trailing slash.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_parts() {
        let base = BaseUrl::new(Scheme::Http, "10.7.7.100", 8080).unwrap();
        assert_eq!(base.host(), Some("10.7.7.100"));
        assert_eq!(base.to_string(), "http://10.7.7.100:8080");
    }

    #[test]
    fn endpoint_url_construction() {
        let base = BaseUrl::new(Scheme::Https, "nvr.local", 443).unwrap();
        assert_eq!(
            base.endpoint_url("/qvrpro/camera/list"),
            "https://nvr.local/qvrpro/camera/list"
        );
    }

    #[test]
    fn brackets_ipv6_hosts() {
        let base = BaseUrl::new(Scheme::Http, "::1", 8080).unwrap();
        assert_eq!(base.endpoint_url("/qvrentry"), "http://[::1]:8080/qvrentry");
    }

    #[test]
    fn rejects_empty_host() {
        assert!(BaseUrl::new(Scheme::Http, "  ", 8080).is_err());
    }

    #[test]
    fn rejects_host_with_path() {
        assert!(BaseUrl::new(Scheme::Http, "nvr.local/admin", 8080).is_err());
    }

    #[test]
    fn rejects_host_with_credentials() {
        assert!(BaseUrl::new(Scheme::Http, "admin:pw@nvr.local", 8080).is_err());
    }
}
