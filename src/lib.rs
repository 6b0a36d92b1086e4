//! Hierarchical URL route matching.
//!
//! A route table is declared once as a tree of [`RouteSource`]s, compiled into a
//! [`RouteMatcher`], then queried repeatedly: "which routes does this URL
//! activate?" The answer is the chain of matched routes from root to leaf.
//!
//! ```
//! use route_matcher::{RouteMatcher, RouteMatcherOptions, RouteSource};
//!
//! let matcher = RouteMatcher::new(
//!     vec![RouteSource::new("app").with_url("/app/*").with_children(vec![
//!         RouteSource::new("details").with_url("/details/:id"),
//!     ])],
//!     RouteMatcherOptions::new("https://x.test"),
//! )?;
//!
//! let chain = matcher.match_str("/app/details/42")?.unwrap();
//! assert_eq!(chain[1].route.id(), "app.details");
//! assert_eq!(chain[1].pattern_match.group("id"), Some("42"));
//! # Ok::<(), route_matcher::RouteError>(())
//! ```

pub mod config;
pub mod observability;
pub mod pattern;
pub mod routing;

pub use config::RoutesConfig;
pub use pattern::{Pattern, PatternCompiler, PatternError, PatternMatch};
pub use routing::{
    MatchResult, MatchSummary, Route, RouteError, RouteMatcher, RouteMatcherOptions, RouteSource,
    SharedMatcher, UrlMatch,
};
