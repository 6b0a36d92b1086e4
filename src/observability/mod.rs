//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route compilation and matching produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges, histograms via `metrics`)
//!
//! Consumers:
//!     → stderr (pretty or compact)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or recorder is the
//!   binary's job
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;
