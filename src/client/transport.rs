//! HTTP transport seam.
//!
//! The submission protocol only needs "POST this JSON, give me status and
//! body". Every received response is `Ok`, whatever its status; only failures
//! to get a response at all are `Err`.

use crate::error::TransportError;
use std::time::Duration;

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking JSON POST.
pub trait HttpTransport {
    /// POST `body` as JSON to `url`.
    fn post_json(&self, url: &str, body: &serde_json::Value)
        -> Result<HttpResponse, TransportError>;
}

/// `ureq`-backed transport.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }

    /// Map a ureq transport error to a TransportError.
    fn map_transport(transport: ureq::Transport) -> TransportError {
        match transport.kind() {
            ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => {
                TransportError::ConnectionFailed(transport.to_string())
            }
            ureq::ErrorKind::Io => TransportError::Timeout(transport.to_string()),
            _ => TransportError::Other(transport.to_string()),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl HttpTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let result = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_json(body);

        match result {
            Ok(response) => {
                let status = response.status();
                let body = response
                    .into_string()
                    .map_err(|e| TransportError::Body(e.to_string()))?;
                Ok(HttpResponse { status, body })
            }
            // ureq reports 4xx/5xx as errors; for us they are still responses
            Err(ureq::Error::Status(status, response)) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(transport)) => Err(Self::map_transport(transport)),
        }
    }
}
