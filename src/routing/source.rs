//! Declared route definitions.

use serde::{Deserialize, Serialize};

/// Catch-all pattern used by routes that only group children.
pub const CATCH_ALL: &str = "/*";

/// A caller-declared route node, before compilation.
///
/// `id` only has to be unique among siblings; the compiled route's id is
/// qualified with its ancestors' ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteSource {
    /// Local identifier.
    pub id: String,

    /// Pattern relative to the parent's resolved url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Nested routes, in priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteSource>>,
}

impl RouteSource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            children: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteSource>) -> Self {
        self.children = Some(children);
        self
    }

    /// Returns true if this source declares a non-empty url of its own.
    ///
    /// An empty string counts as no url.
    pub fn declares_url(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// The local pattern used for compilation: the declared url or [`CATCH_ALL`].
    pub fn effective_url(&self) -> &str {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => CATCH_ALL,
        }
    }

    /// A source is valid when it has a url, children, or both.
    pub fn is_valid(&self) -> bool {
        self.declares_url() || self.children.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_counts_as_missing() {
        let source = RouteSource::new("blank").with_url("");
        assert!(!source.declares_url());
        assert!(!source.is_valid());
        assert_eq!(source.effective_url(), CATCH_ALL);
    }

    #[test]
    fn test_children_only_is_valid() {
        let source = RouteSource::new("group").with_children(vec![]);
        assert!(source.is_valid());
        assert_eq!(source.effective_url(), "/*");
    }

    #[test]
    fn test_deserialize_nested_toml() {
        let source: RouteSource = toml::from_str(
            r#"
            id = "app"
            url = "/app/*"

            [[children]]
            id = "details"
            url = "/details/:id"
            "#,
        )
        .unwrap();

        assert_eq!(source.url.as_deref(), Some("/app/*"));
        let children = source.children.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "details");
        assert!(children[0].children.is_none());
    }
}
