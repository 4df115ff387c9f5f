//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gate, http, security, notify produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached by the HTTP layer and shows up in trace spans
//! - Rate-limited traffic is logged at warn, never as an error

pub mod logging;
pub mod metrics;
