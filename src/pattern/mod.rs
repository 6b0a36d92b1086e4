//! URL pattern primitive.
//!
//! # Data Flow
//! ```text
//! resolved pattern string + base URL
//!     → PatternCompiler::compile
//!     → Box<dyn Pattern> (immutable, owned by its Route)
//!
//! At match time:
//!     Url → Pattern::exec → Option<PatternMatch> (captured groups)
//! ```
//!
//! # Design Decisions
//! - The routing engine only sees the traits; `path.rs` is the default backend
//! - Compilation errors are a distinct type so callers can tell them apart
//!   from routing errors
//! - Patterns are anchored: the whole pathname must match

pub mod path;

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;
use thiserror::Error;
use url::Url;

pub use path::{PathPattern, PathPatternCompiler};

/// A compiled URL pattern.
pub trait Pattern: Send + Sync + Debug {
    /// Match `url` against this pattern, returning the captured groups on success.
    fn exec(&self, url: &Url) -> Option<PatternMatch>;

    /// Returns true if `url` matches this pattern.
    fn test(&self, url: &Url) -> bool {
        self.exec(url).is_some()
    }
}

/// Compiles pattern strings into [`Pattern`]s.
pub trait PatternCompiler: Send + Sync + Debug {
    fn compile(&self, pattern: &str, base_url: &Url) -> Result<Box<dyn Pattern>, PatternError>;
}

/// Result of a successful pattern match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    /// The pathname the pattern was matched against.
    pub pathname: String,
    /// Named (or numbered, for unnamed groups) captures.
    pub groups: BTreeMap<String, String>,
}

impl PatternMatch {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            groups: BTreeMap::new(),
        }
    }

    /// Look up a captured group by name.
    pub fn group(&self, name: &str) -> Option<&str> {
        self.groups.get(name).map(String::as_str)
    }
}

/// Errors raised while compiling a pattern string.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern `{0}` must start with `/`")]
    MissingLeadingSlash(String),

    #[error("missing group name after `:` at offset {offset} in `{pattern}`")]
    MissingName { pattern: String, offset: usize },

    #[error("duplicate group name `{name}` in `{pattern}`")]
    DuplicateName { pattern: String, name: String },

    #[error("unbalanced group at offset {offset} in `{pattern}`")]
    UnbalancedGroup { pattern: String, offset: usize },

    #[error("custom regex `{regex}` must not contain capturing groups")]
    CapturingGroup { regex: String },

    #[error("unsupported syntax in `{pattern}`: {detail}")]
    Unsupported { pattern: String, detail: &'static str },

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}
