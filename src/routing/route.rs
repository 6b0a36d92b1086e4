//! Compiled route nodes.
//!
//! # Responsibilities
//! - Validate a route source (url, children, or both)
//! - Derive the qualified id and resolved url from the parent
//! - Compile the resolved url into a pattern
//! - Build children top-down, in declaration order
//!
//! # Design Decisions
//! - Children receive only the parent's resolved id and url, never a
//!   back-reference, so the tree has plain ownership
//! - Routes are immutable once built

use url::Url;

use crate::pattern::{Pattern, PathPatternCompiler, PatternCompiler};
use crate::routing::error::RouteError;
use crate::routing::source::RouteSource;

/// Resolved state a child inherits from its parent.
#[derive(Debug, Clone, Copy)]
struct Parent<'a> {
    id: &'a str,
    url: &'a str,
}

/// A compiled route node.
#[derive(Debug)]
pub struct Route {
    id: String,
    url: String,
    pattern: Box<dyn Pattern>,
    children: Option<Vec<Route>>,
    source: RouteSource,
}

impl Route {
    /// Build a route (and its children) with the default pattern compiler.
    pub fn new(source: RouteSource, parent: Option<&Route>, base_url: &Url) -> Result<Self, RouteError> {
        Self::with_compiler(source, parent, base_url, &PathPatternCompiler)
    }

    /// Build a route with an injected pattern compiler.
    pub fn with_compiler(
        source: RouteSource,
        parent: Option<&Route>,
        base_url: &Url,
        compiler: &dyn PatternCompiler,
    ) -> Result<Self, RouteError> {
        let parent = parent.map(|p| Parent {
            id: &p.id,
            url: &p.url,
        });
        Self::build(source, parent, base_url, compiler)
    }

    fn build(
        source: RouteSource,
        parent: Option<Parent<'_>>,
        base_url: &Url,
        compiler: &dyn PatternCompiler,
    ) -> Result<Self, RouteError> {
        let id = build_id(&source.id, parent.map(|p| p.id));

        if !source.is_valid() {
            return Err(RouteError::InvalidRoute { id });
        }

        let url = build_url(source.effective_url(), parent.map(|p| p.url));
        let pattern = compiler.compile(&url, base_url)?;

        tracing::trace!(route_id = %id, url = %url, "Route compiled");

        let children = match &source.children {
            Some(children) => {
                let this = Parent { id: &id, url: &url };
                let built = children
                    .iter()
                    .cloned()
                    .map(|child| Self::build(child, Some(this), base_url, compiler))
                    .collect::<Result<Vec<_>, _>>()?;
                Some(built)
            }
            None => None,
        };

        Ok(Self {
            id,
            url,
            pattern,
            children,
            source,
        })
    }

    /// Qualified id (`parent.child`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully resolved pattern string.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pattern(&self) -> &dyn Pattern {
        self.pattern.as_ref()
    }

    pub fn children(&self) -> Option<&[Route]> {
        self.children.as_deref()
    }

    /// The source this route was built from.
    pub fn source(&self) -> &RouteSource {
        &self.source
    }
}

fn build_id(id: &str, parent_id: Option<&str>) -> String {
    match parent_id {
        Some(parent_id) => format!("{parent_id}.{id}"),
        None => id.to_string(),
    }
}

fn build_url(url: &str, parent_url: Option<&str>) -> String {
    let Some(parent_url) = parent_url else {
        return url.to_string();
    };

    let trimmed_parent = parent_url.strip_suffix('*').unwrap_or(parent_url);
    let trimmed_parent = trimmed_parent.strip_suffix('/').unwrap_or(trimmed_parent);
    let trimmed_url = url.strip_prefix('/').unwrap_or(url);

    format!("{trimmed_parent}/{trimmed_url}")
}
