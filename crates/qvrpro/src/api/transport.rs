//! Blocking HTTP transport for recorder requests.

use reqwest::blocking::Response;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, TransportError};
use crate::types::BaseUrl;

/// HTTP client bound to one recorder.
///
/// Returns raw responses; interpreting status and content type is left to
/// the caller so session state can react to failures.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base: BaseUrl,
}

impl HttpTransport {
    /// Create a transport for the given recorder.
    pub fn new(base: BaseUrl) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("qvrpro/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client, base })
    }

    /// Returns the recorder base URL.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    /// Send a GET request to `path` with the given query pairs.
    pub fn get<Q>(&self, path: &str, query: &Q) -> Result<Response, Error>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "GET");

        let response = self.client.get(&url).query(query).send()?;
        trace!(status = %response.status(), "GET response");
        Ok(response)
    }

    /// Send a POST request to `path` with a JSON body.
    pub fn post<Q, B>(&self, path: &str, query: &Q, body: &B) -> Result<Response, Error>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "POST");

        let response = self.client.post(&url).query(query).json(body).send()?;
        trace!(status = %response.status(), "POST response");
        Ok(response)
    }

    /// Send a PUT request to `path` with no body.
    pub fn put<Q>(&self, path: &str, query: &Q) -> Result<Response, Error>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "PUT");

        let response = self.client.put(&url).query(query).send()?;
        trace!(status = %response.status(), "PUT response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scheme;

    #[test]
    fn transport_creation() {
        let base = BaseUrl::new(Scheme::Http, "10.7.7.100", 8080).unwrap();
        let transport = HttpTransport::new(base.clone()).unwrap();
        assert_eq!(transport.base_url(), &base);
    }
}
