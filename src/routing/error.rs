//! Routing error types.

use thiserror::Error;

use crate::pattern::PatternError;

/// Errors raised while building or querying a route set.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A route source declared neither a url nor children.
    #[error("invalid route `{id}`: a route must have either a URL pattern or child routes")]
    InvalidRoute { id: String },

    /// Two routes resolved to the same qualified id.
    #[error("duplicate route ID detected: {id}")]
    DuplicateRoute { id: String },

    /// The pattern primitive rejected a resolved url.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("invalid base URL `{base}`: {source}")]
    InvalidBaseUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid URL `{input}`: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}
