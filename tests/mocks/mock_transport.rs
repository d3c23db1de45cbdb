use contact_sync::{HttpResponse, HttpTransport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// A request seen by the mock transport.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: serde_json::Value,
}

/// Mock transport for testing.
///
/// Responses are queued per endpoint (the last path segment of the URL).
/// Once a queue is empty the endpoint answers 200. Every request is recorded
/// for verification; clones share the same state.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<Result<HttpResponse, TransportError>>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockTransport {
    /// Create a transport that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a status for the next request to `endpoint`.
    pub fn respond(&self, endpoint: &str, status: u16, body: &str) -> &Self {
        self.push(endpoint, Ok(HttpResponse::new(status, body)))
    }

    /// Queue a transport failure for the next request to `endpoint`.
    pub fn fail(&self, endpoint: &str, error: TransportError) -> &Self {
        self.push(endpoint, Err(error))
    }

    fn push(&self, endpoint: &str, result: Result<HttpResponse, TransportError>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// All requests, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests sent to one endpoint.
    pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.ends_with(&format!("/{}", endpoint)))
            .collect()
    }

    /// Endpoints hit, in order.
    pub fn endpoints(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.url.rsplit('/').next().unwrap_or_default().to_string())
            .collect()
    }
}

impl HttpTransport for MockTransport {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
        });

        let endpoint = url.rsplit('/').next().unwrap_or_default();
        self.responses
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "ok")))
    }
}
