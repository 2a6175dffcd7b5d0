//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing, dispatch and transport produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with key/value fields
//! - Request ID attached by the HTTP layer
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
