//! Canned responses for tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::{Fetch, Response};
use crate::error::{Result, SetupError};

/// Serves registered responses; anything else is a 404
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Response>,
    offline: bool,
    requested: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails as if there were no connection
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(
            url.to_string(),
            Response {
                status: 200,
                reason: "OK".to_string(),
                body: body.into(),
            },
        );
        self
    }

    pub fn with_json(self, url: &str, value: &serde_json::Value) -> Self {
        self.with_body(url, value.to_string())
    }

    pub fn with_status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Response {
                status,
                reason: "Stubbed".to_string(),
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Fetch for StubFetcher {
    fn get(&self, url: &str, _label: &str) -> Result<Response> {
        self.requested.borrow_mut().push(url.to_string());
        if self.offline {
            return Err(SetupError::NoConnection {
                url: url.to_string(),
            });
        }
        Ok(self.responses.get(url).cloned().unwrap_or(Response {
            status: 404,
            reason: "Not Found".to_string(),
            body: Vec::new(),
        }))
    }
}
