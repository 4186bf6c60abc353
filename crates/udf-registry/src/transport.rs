//! Registry lookup transport.
//!
//! The client resolves coordinates through this seam so tests (and
//! non-HTTP deployments) can supply their own lookup. The HTTP
//! implementation performs exactly one request per call: no timeout
//! tuning, no retries. Callers needing resilience wrap the client.

use crate::coords::SchemaCoords;
use crate::error::RegistryError;

/// One external lookup of a schema definition body.
pub trait RegistryTransport: Send + Sync {
    /// Fetch the raw registry response body for the given coordinates.
    ///
    /// A not-found response must surface as `SchemaNotFound`; any other
    /// transport-level failure as `Unavailable`.
    fn fetch(&self, coords: &SchemaCoords) -> Result<String, RegistryError>;
}

/// HTTP transport: `GET {base_url}{coords.lookup_path()}`.
pub struct HttpRegistryTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRegistryTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RegistryTransport for HttpRegistryTransport {
    fn fetch(&self, coords: &SchemaCoords) -> Result<String, RegistryError> {
        let url = format!("{}{}", self.base_url, coords.lookup_path());
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::SchemaNotFound {
                schema_id: coords.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RegistryError::Unavailable(format!(
                "registry returned {status} for {url}"
            )));
        }

        response
            .text()
            .map_err(|e| RegistryError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let transport = HttpRegistryTransport::new("http://registry.internal:8990/");
        assert_eq!(transport.base_url(), "http://registry.internal:8990");
    }
}
