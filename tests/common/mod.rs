//! Shared route fixtures for integration tests.

#![allow(dead_code)]

use route_matcher::{RouteMatcher, RouteMatcherOptions, RouteSource};
use url::Url;

pub const BASE_URL: &str = "https://route-matcher.test";

pub fn home() -> RouteSource {
    RouteSource::new("home").with_url("/")
}

pub fn profile() -> RouteSource {
    RouteSource::new("profile").with_url("/profiles/:username")
}

pub fn param() -> RouteSource {
    RouteSource::new("param").with_url("/foo/:bar")
}

pub fn parent_with_url() -> RouteSource {
    RouteSource::new("app").with_url("/app/*").with_children(vec![
        RouteSource::new("app-home").with_url("/"),
        RouteSource::new("app-details").with_url("/details/:id"),
    ])
}

pub fn parent_without_url() -> RouteSource {
    RouteSource::new("group")
        .with_children(vec![RouteSource::new("group-detail").with_url("/group/:id")])
}

pub fn unmatched_child() -> RouteSource {
    RouteSource::new("parent-only")
        .with_url("/parent/*")
        .with_children(vec![RouteSource::new("parent-only-child").with_url("/other")])
}

pub fn multi_level_url_less() -> RouteSource {
    RouteSource::new("level-one").with_children(vec![RouteSource::new("level-two")
        .with_children(vec![RouteSource::new("level-three").with_url("/multi/:id")])])
}

pub fn backtracking_branches() -> Vec<RouteSource> {
    vec![
        RouteSource::new("dead-end")
            .with_children(vec![RouteSource::new("dead-end-child").with_url("/dead/child")]),
        RouteSource::new("target").with_url("/target/:slug"),
    ]
}

pub fn wildcard() -> RouteSource {
    RouteSource::new("wildcard").with_url("/app/:rest*")
}

pub fn secondary_wildcard() -> RouteSource {
    RouteSource::new("secondary").with_url("/app/:rest*")
}

pub fn build_matcher(sources: Vec<RouteSource>) -> RouteMatcher {
    RouteMatcher::new(sources, RouteMatcherOptions::new(BASE_URL)).unwrap()
}

pub fn build_url(path: &str) -> Url {
    Url::parse(BASE_URL).unwrap().join(path).unwrap()
}

/// Ids of the matched chain, empty for no-match.
pub fn matched_ids(matcher: &RouteMatcher, path: &str) -> Vec<String> {
    matcher
        .match_url(&build_url(path))
        .unwrap_or_default()
        .iter()
        .map(|m| m.route.id().to_string())
        .collect()
}
