//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and delivery channels produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the TraceLayer span
//! - Metrics are cheap and silent without an exporter

pub mod logging;
pub mod metrics;
