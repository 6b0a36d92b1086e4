//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteSource[] + base URL
//!     → route.rs (validate, derive id/url, compile pattern, build children)
//!     → matcher.rs (index by qualified id, reject duplicates)
//!     → Freeze as immutable RouteMatcher
//!
//! Matching:
//!     URL
//!     → matcher.rs (depth-first search, backtracking over siblings)
//!     → Return: root-to-leaf chain or no-match
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable afterwards
//! - Deterministic: same input always yields the same chain
//! - First accepted sibling wins (declaration order)
//! - Reload swaps whole matchers (shared.rs), never mutates one

pub mod error;
pub mod matcher;
pub mod route;
pub mod shared;
pub mod source;

pub use error::RouteError;
pub use matcher::{MatchResult, MatchSummary, RouteMatcher, RouteMatcherOptions, UrlMatch};
pub use route::Route;
pub use shared::SharedMatcher;
pub use source::RouteSource;
