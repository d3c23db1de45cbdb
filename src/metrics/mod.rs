//! HTTP instrumentation for the submission client.
//!
//! Provides request counters and duration tracking. Clones share the same
//! counters, so a handle taken before a run can be read after it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for backend requests.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests attempted
    http_requests_total: Arc<AtomicU64>,

    /// Requests that got no response at all
    transport_errors_total: Arc<AtomicU64>,

    /// Responses with a status not accepted for their stage
    rejections_total: Arc<AtomicU64>,

    /// Organization submissions answered with 409
    conflicts_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            transport_errors_total: Arc::new(AtomicU64::new(0)),
            rejections_total: Arc::new(AtomicU64::new(0)),
            conflicts_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a transport failure.
    pub fn record_transport_error(&self) {
        self.transport_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected response.
    pub fn record_rejection(&self) {
        self.rejections_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an "already exists" organization response.
    pub fn record_conflict(&self) {
        self.conflicts_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total transport errors.
    pub fn transport_errors_total(&self) -> u64 {
        self.transport_errors_total.load(Ordering::Relaxed)
    }

    /// Get total rejected responses.
    pub fn rejections_total(&self) -> u64 {
        self.rejections_total.load(Ordering::Relaxed)
    }

    /// Get total organization conflicts.
    pub fn conflicts_total(&self) -> u64 {
        self.conflicts_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            transport_errors_total: self.transport_errors_total(),
            rejections_total: self.rejections_total(),
            conflicts_total: self.conflicts_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub transport_errors_total: u64,
    pub rejections_total: u64,
    pub conflicts_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests ({} rejected, {} transport errors, {} existing organizations), avg {:.1} ms",
            self.http_requests_total,
            self.rejections_total,
            self.transport_errors_total,
            self.conflicts_total,
            self.http_duration_avg_ms
        )
    }
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as a transport error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_transport_error();
    }
}
