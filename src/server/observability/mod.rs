// Observability for the browse server
// Request counters in Prometheus text format; logging goes through tracing

pub mod metrics;

pub use metrics::Metrics;
