//! Metrics collection.
//!
//! # Metrics
//! - `route_matcher_matches_total` (counter): match calls by outcome
//! - `route_matcher_match_depth` (histogram): length of accepted chains
//! - `route_matcher_routes` (gauge): routes in the most recently built matcher

pub const MATCHES_TOTAL: &str = "route_matcher_matches_total";
pub const MATCH_DEPTH: &str = "route_matcher_match_depth";
pub const ROUTES: &str = "route_matcher_routes";

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    ::metrics::describe_counter!(MATCHES_TOTAL, "Route match calls by outcome");
    ::metrics::describe_histogram!(MATCH_DEPTH, "Length of accepted match chains");
    ::metrics::describe_gauge!(ROUTES, "Routes in the most recently built matcher");
}

pub fn record_match(matched: bool, depth: usize) {
    let outcome = if matched { "matched" } else { "no_match" };
    ::metrics::counter!(MATCHES_TOTAL, "outcome" => outcome).increment(1);
    if matched {
        ::metrics::histogram!(MATCH_DEPTH).record(depth as f64);
    }
}

pub fn record_build(route_count: usize) {
    ::metrics::gauge!(ROUTES).set(route_count as f64);
}
