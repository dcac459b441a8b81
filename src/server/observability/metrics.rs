// Prometheus metrics for the browse server

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Request and outcome counters, shared by every handler
#[derive(Debug, Default)]
pub struct Metrics {
    // Request metrics
    requests_total: AtomicU64,
    requests_in_flight: AtomicU64,
    request_duration_ms_sum: AtomicU64,
    request_duration_count: AtomicU64,

    // Business metrics
    searches_total: AtomicU64,
    views_total: AtomicU64,

    // Outcome metrics
    not_found_total: AtomicU64,
    errors_total: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_requests_total(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_requests_in_flight(&self) {
        self.requests_in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec_requests_in_flight(&self) {
        self.requests_in_flight.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record request duration (in milliseconds)
    pub fn record_request_duration(&self, duration_ms: u64) {
        self.request_duration_ms_sum.fetch_add(duration_ms, Ordering::Relaxed);
        self.request_duration_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_duration_avg_ms(&self) -> f64 {
        let sum = self.request_duration_ms_sum.load(Ordering::Relaxed);
        let count = self.request_duration_count.load(Ordering::Relaxed);
        if count > 0 {
            sum as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Search and listing requests, including failed ones
    pub fn inc_searches(&self) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_views(&self) {
        self.views_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Unknown tables and unknown entity ids
    pub fn inc_not_found(&self) {
        self.not_found_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Storage and encoding failures
    pub fn inc_errors(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn requests_in_flight(&self) -> u64 {
        self.requests_in_flight.load(Ordering::Relaxed)
    }

    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    pub fn views_total(&self) -> u64 {
        self.views_total.load(Ordering::Relaxed)
    }

    pub fn not_found_total(&self) -> u64 {
        self.not_found_total.load(Ordering::Relaxed)
    }

    pub fn errors_total(&self) -> u64 {
        self.errors_total.load(Ordering::Relaxed)
    }

    /// Prometheus text exposition
    pub fn render(&self) -> String {
        let mut out = String::new();
        let counters = [
            ("nesql_http_requests_total", "counter", "Total HTTP requests received", self.requests_total()),
            (
                "nesql_http_requests_in_flight",
                "gauge",
                "Requests currently being processed",
                self.requests_in_flight(),
            ),
            ("nesql_search_total", "counter", "Total search and listing requests", self.searches_total()),
            ("nesql_view_total", "counter", "Total entity view requests", self.views_total()),
            ("nesql_not_found_total", "counter", "Unknown tables or entities", self.not_found_total()),
            ("nesql_errors_total", "counter", "Total errors", self.errors_total()),
        ];

        for (name, kind, help, value) in counters {
            let _ = writeln!(out, "# HELP {} {}", name, help);
            let _ = writeln!(out, "# TYPE {} {}", name, kind);
            let _ = writeln!(out, "{} {}", name, value);
            out.push('\n');
        }

        let _ = writeln!(out, "# HELP nesql_http_request_duration_ms_avg Average request latency");
        let _ = writeln!(out, "# TYPE nesql_http_request_duration_ms_avg gauge");
        let _ = writeln!(out, "nesql_http_request_duration_ms_avg {:.3}", self.request_duration_avg_ms());
        out
    }
}
