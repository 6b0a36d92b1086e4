//! Route set compilation and matching.
//!
//! # Responsibilities
//! - Compile top-level route sources into a route forest
//! - Index every route by qualified id, rejecting duplicates
//! - Resolve a URL to the chain of routes it activates
//!
//! # Matching
//! ```text
//! for each sibling, in declaration order:
//!     pattern misses            → next sibling
//!     matches, no children      → accept, stop
//!     matches, a child accepted → accept, stop
//!     matches, no child matched:
//!         route declared a url  → accept parent alone, stop
//!         url-less grouping     → discard, next sibling
//! ```
//!
//! # Design Decisions
//! - Declaration order is priority order: first accepted sibling wins
//! - The chain is local to each call; matching never mutates the matcher
//! - Lookup stores index paths into the forest instead of references

use std::collections::HashMap;

use serde::Serialize;
use url::Url;

use crate::config::RoutesConfig;
use crate::observability::metrics;
use crate::pattern::{PathPatternCompiler, PatternCompiler, PatternMatch};
use crate::routing::error::RouteError;
use crate::routing::route::Route;
use crate::routing::source::RouteSource;

/// Options for building a [`RouteMatcher`].
#[derive(Debug, Clone)]
pub struct RouteMatcherOptions {
    /// Base URL patterns are resolved against.
    pub base_url: String,
}

impl RouteMatcherOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// One matched route and its captures.
#[derive(Debug, Clone)]
pub struct UrlMatch<'a> {
    pub route: &'a Route,
    pub pattern_match: PatternMatch,
}

/// Matched routes ordered root to leaf.
pub type MatchResult<'a> = Vec<UrlMatch<'a>>;

/// Serializable view of a [`UrlMatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub url: String,
    #[serde(flatten)]
    pub pattern_match: PatternMatch,
}

impl From<&UrlMatch<'_>> for MatchSummary {
    fn from(m: &UrlMatch<'_>) -> Self {
        Self {
            id: m.route.id().to_string(),
            url: m.route.url().to_string(),
            pattern_match: m.pattern_match.clone(),
        }
    }
}

/// A compiled, immutable route set.
#[derive(Debug)]
pub struct RouteMatcher {
    routes: Vec<Route>,
    routes_map: HashMap<String, Vec<usize>>,
    base_url: Url,
}

impl RouteMatcher {
    /// Build a matcher with the default pattern compiler.
    pub fn new(sources: Vec<RouteSource>, options: RouteMatcherOptions) -> Result<Self, RouteError> {
        Self::with_compiler(sources, options, &PathPatternCompiler)
    }

    /// Build a matcher with an injected pattern compiler.
    pub fn with_compiler(
        sources: Vec<RouteSource>,
        options: RouteMatcherOptions,
        compiler: &dyn PatternCompiler,
    ) -> Result<Self, RouteError> {
        let base_url = Url::parse(&options.base_url).map_err(|source| RouteError::InvalidBaseUrl {
            base: options.base_url.clone(),
            source,
        })?;

        let routes = sources
            .into_iter()
            .map(|source| Route::with_compiler(source, None, &base_url, compiler))
            .collect::<Result<Vec<_>, _>>()?;

        let mut routes_map = HashMap::new();
        let mut path = Vec::new();
        index_routes(&routes, &mut path, &mut routes_map)?;

        tracing::debug!(
            base_url = %base_url,
            top_level = routes.len(),
            total = routes_map.len(),
            "Route matcher built"
        );
        metrics::record_build(routes_map.len());

        Ok(Self {
            routes,
            routes_map,
            base_url,
        })
    }

    /// Build a matcher from a loaded configuration.
    pub fn from_config(config: &RoutesConfig) -> Result<Self, RouteError> {
        Self::new(
            config.routes.clone(),
            RouteMatcherOptions::new(config.base_url.clone()),
        )
    }

    /// Top-level routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up any route in the forest by qualified id.
    pub fn get(&self, id: &str) -> Option<&Route> {
        let path = self.routes_map.get(id)?;
        let (first, rest) = path.split_first()?;
        let mut route = self.routes.get(*first)?;
        for &i in rest {
            route = route.children()?.get(i)?;
        }
        Some(route)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.routes_map.contains_key(id)
    }

    /// Number of routes in the forest, at every depth.
    pub fn len(&self) -> usize {
        self.routes_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes_map.is_empty()
    }

    /// Every qualified id, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.routes_map.keys().map(String::as_str)
    }

    /// Pre-order walk over every route.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        let mut stack: Vec<&Route> = self.routes.iter().rev().collect();
        std::iter::from_fn(move || {
            let route = stack.pop()?;
            if let Some(children) = route.children() {
                stack.extend(children.iter().rev());
            }
            Some(route)
        })
    }

    /// Resolve `url` to the chain of routes it activates, root to leaf.
    pub fn match_url(&self, url: &Url) -> Option<MatchResult<'_>> {
        let mut chain = Vec::new();
        match_routes(&self.routes, url, &mut chain);

        tracing::debug!(
            url = %url,
            matched = !chain.is_empty(),
            depth = chain.len(),
            "Route match"
        );
        metrics::record_match(!chain.is_empty(), chain.len());

        if chain.is_empty() {
            None
        } else {
            Some(chain)
        }
    }

    /// Resolve `input` (absolute, or relative to the base URL) and match it.
    pub fn match_str(&self, input: &str) -> Result<Option<MatchResult<'_>>, RouteError> {
        let url = self.base_url.join(input).map_err(|source| RouteError::InvalidUrl {
            input: input.to_string(),
            source,
        })?;
        Ok(self.match_url(&url))
    }
}

/// Pre-order insert of every route, keyed by qualified id.
fn index_routes(
    routes: &[Route],
    path: &mut Vec<usize>,
    map: &mut HashMap<String, Vec<usize>>,
) -> Result<(), RouteError> {
    for (i, route) in routes.iter().enumerate() {
        path.push(i);

        if map.contains_key(route.id()) {
            return Err(RouteError::DuplicateRoute {
                id: route.id().to_string(),
            });
        }
        map.insert(route.id().to_string(), path.clone());

        if let Some(children) = route.children() {
            index_routes(children, path, map)?;
        }
        path.pop();
    }
    Ok(())
}

/// Depth-first search over `routes`, appending accepted matches to `chain`.
///
/// Returns true if this level accepted a match. On false, `chain` is left
/// exactly as it was on entry.
fn match_routes<'a>(routes: &'a [Route], url: &Url, chain: &mut Vec<UrlMatch<'a>>) -> bool {
    let depth = chain.len();

    for route in routes {
        let Some(pattern_match) = route.pattern().exec(url) else {
            continue;
        };
        chain.push(UrlMatch {
            route,
            pattern_match,
        });

        let Some(children) = route.children() else {
            return true;
        };

        if match_routes(children, url, chain) || route.source().declares_url() {
            return true;
        }

        tracing::trace!(route_id = %route.id(), "Discarding pass-through match");
        chain.truncate(depth);
    }

    false
}
