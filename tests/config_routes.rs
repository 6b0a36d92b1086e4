//! Loading route tables from TOML and swapping them at runtime.

use route_matcher::config::{parse_config, ConfigError, ValidationError};
use route_matcher::{MatchSummary, RouteMatcher, SharedMatcher};

const ROUTES: &str = r#"
base_url = "https://route-matcher.test"

[[routes]]
id = "home"
url = "/"

[[routes]]
id = "app"
url = "/app/*"

[[routes.children]]
id = "details"
url = "/details/:id"

[[routes]]
id = "group"

[[routes.children]]
id = "detail"
url = "/group/:id"
"#;

#[test]
fn test_config_builds_matcher() {
    let config = parse_config(ROUTES).unwrap();
    let matcher = RouteMatcher::from_config(&config).unwrap();

    assert_eq!(matcher.len(), 5);
    let chain = matcher.match_str("/app/details/42").unwrap().unwrap();
    let ids: Vec<_> = chain.iter().map(|m| m.route.id()).collect();
    assert_eq!(ids, vec!["app", "app.details"]);
}

#[test]
fn test_match_summary_json() {
    let config = parse_config(ROUTES).unwrap();
    let matcher = RouteMatcher::from_config(&config).unwrap();

    let chain = matcher.match_str("/group/abc").unwrap().unwrap();
    let summaries: Vec<MatchSummary> = chain.iter().map(MatchSummary::from).collect();
    let json = serde_json::to_value(&summaries).unwrap();

    assert_eq!(json[0]["id"], "group");
    assert_eq!(json[0]["url"], "/*");
    assert_eq!(json[1]["id"], "group.detail");
    assert_eq!(json[1]["pathname"], "/group/abc");
    assert_eq!(json[1]["groups"]["id"], "abc");
}

#[test]
fn test_duplicate_ids_rejected_at_load() {
    let err = parse_config(
        r#"
        [[routes]]
        id = "dup"
        url = "/a"

        [[routes]]
        id = "dup"
        url = "/b"
        "#,
    )
    .unwrap_err();

    match err {
        ConfigError::Validation(errors) => assert_eq!(
            errors,
            vec![ValidationError::DuplicateId {
                id: "dup".to_string()
            }]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_shared_matcher_reload() {
    let config = parse_config(ROUTES).unwrap();
    let shared = SharedMatcher::new(RouteMatcher::from_config(&config).unwrap());
    let snapshot = shared.load();

    let reloaded = parse_config(
        r#"
        base_url = "https://route-matcher.test"

        [[routes]]
        id = "only"
        url = "/only"
        "#,
    )
    .unwrap();
    shared.store(RouteMatcher::from_config(&reloaded).unwrap());

    assert!(snapshot.match_str("/").unwrap().is_some());
    assert!(shared.load().match_str("/").unwrap().is_none());
    assert!(shared.load().match_str("/only").unwrap().is_some());
}
