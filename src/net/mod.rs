//! Plain request/response access to vendor APIs
//!
//! Everything the installer downloads goes through the [`Fetch`] trait, so
//! tests can serve canned responses instead of touching the network.

use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::{Result, SetupError};
use crate::progress::DownloadProgress;
use crate::report::{self, Severity};

#[cfg(test)]
pub mod stub;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The body of a 200 response, or an error naming `resource`
    pub fn into_body(self, resource: &str) -> Result<Vec<u8>> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(SetupError::HttpStatus {
                status: self.status,
                reason: self.reason,
                resource: resource.to_string(),
            })
        }
    }
}

/// Source of HTTP GET responses
pub trait Fetch {
    /// GET `url`; `label` describes what is being downloaded for progress output
    fn get(&self, url: &str, label: &str) -> Result<Response>;
}

/// Blocking HTTP client with download progress
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mcsetup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str, label: &str) -> Result<Response> {
        tracing::debug!(url, "GET");
        let mut response = self.client.get(url).send()?;
        let status = response.status();
        let progress = DownloadProgress::new(label, response.content_length());

        let mut body = Vec::new();
        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = response.read(&mut buffer).map_err(|e| {
                progress.abandon();
                SetupError::RequestFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })?;
            if bytes_read == 0 {
                break;
            }
            body.extend_from_slice(&buffer[..bytes_read]);
            progress.advance(bytes_read);
        }
        progress.finish();

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "response");
        Ok(Response {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        })
    }
}

/// Download `url`, failing on anything but a 200
pub fn fetch(fetcher: &dyn Fetch, url: &str, resource: &str) -> Result<Vec<u8>> {
    fetcher.get(url, resource)?.into_body(resource)
}

/// Download `url`, reporting failure at `severity` instead of failing
///
/// `Ok(None)` means the download failed and was reported as info or warning.
pub fn fetch_optional(
    fetcher: &dyn Fetch,
    url: &str,
    resource: &str,
    severity: Severity,
) -> Result<Option<Vec<u8>>> {
    match fetch(fetcher, url, resource) {
        Ok(body) => Ok(Some(body)),
        Err(err) => {
            report::raise(severity, err)?;
            Ok(None)
        }
    }
}

/// Download and decode a JSON document
pub fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetch, url: &str, resource: &str) -> Result<T> {
    let body = fetch(fetcher, url, resource)?;
    parse_json(&body, resource)
}

/// Decode a JSON body, naming `resource` on failure
pub fn parse_json<T: DeserializeOwned>(body: &[u8], resource: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| SetupError::UnexpectedResponse {
        resource: resource.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::stub::StubFetcher;
    use super::*;

    #[test]
    fn test_fetch_ok() {
        let fetcher = StubFetcher::new().with_body("https://example.test/a", b"hello".to_vec());
        assert_eq!(
            fetch(&fetcher, "https://example.test/a", "thing").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_fetch_status_error() {
        let fetcher = StubFetcher::new();
        let err = fetch(&fetcher, "https://example.test/missing", "Spigot jarfile").unwrap_err();
        assert!(matches!(err, SetupError::HttpStatus { status: 404, .. }));
        assert!(err.to_string().contains("Spigot jarfile"));
    }

    #[test]
    fn test_fetch_optional_warn_returns_none() {
        let fetcher = StubFetcher::new();
        let body = fetch_optional(&fetcher, "https://example.test/x", "template", Severity::Warn)
            .unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn test_fetch_optional_fatal_fails() {
        let fetcher = StubFetcher::new();
        let result = fetch_optional(&fetcher, "https://example.test/x", "template", Severity::Fatal);
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_json() {
        #[derive(serde::Deserialize)]
        struct Doc {
            version: String,
        }
        let fetcher = StubFetcher::new()
            .with_body("https://example.test/j", br#"{"version":"1.0"}"#.to_vec());
        let doc: Doc = fetch_json(&fetcher, "https://example.test/j", "doc").unwrap();
        assert_eq!(doc.version, "1.0");
    }

    #[test]
    fn test_fetch_json_bad_body() {
        let fetcher = StubFetcher::new().with_body("https://example.test/j", b"<html>".to_vec());
        let result: Result<serde_json::Value> = fetch_json(&fetcher, "https://example.test/j", "doc");
        assert!(matches!(result, Err(SetupError::UnexpectedResponse { .. })));
    }
}
