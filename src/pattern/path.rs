//! Pathname pattern compiler.
//!
//! # Syntax
//! - Literal text matches itself; `\` escapes the next character
//! - `:name` matches one path segment, `:name(\d+)` uses a custom regex
//! - `(regex)` and `*` are unnamed groups, numbered from `"0"`
//! - `?`, `*` and `+` after a group make it optional / repeated
//!
//! # Design Decisions
//! - A `/` right before a modified group becomes part of the group, so
//!   `/app/:rest*` also matches `/app`
//! - Origin (scheme, host, port) must equal the base URL's origin
//! - Search and hash are not constrained
//! - Literal text is percent-encoded like a URL path before matching, so
//!   `/café` matches the encoded `/caf%C3%A9`; captures stay encoded

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use url::Url;

use super::{Pattern, PatternCompiler, PatternError, PatternMatch};

const SEGMENT: &str = "[^/]+?";
const WILDCARD: &str = ".*";

/// Characters `Url` percent-encodes in a path.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    None,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Debug)]
enum Token {
    Literal(char),
    Group {
        name: String,
        regex: String,
        modifier: Modifier,
    },
}

/// A pathname pattern compiled to an anchored regex.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    names: Vec<String>,
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
}

impl PathPattern {
    /// Compile `pattern` relative to `base_url`.
    pub fn new(pattern: &str, base_url: &Url) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let tokens = tokenize(pattern)?;
        let (source, names) = build_regex(pattern, &tokens)?;
        let regex = Regex::new(&source)?;

        Ok(Self {
            regex,
            names,
            scheme: base_url.scheme().to_string(),
            host: base_url.host_str().map(str::to_string),
            port: base_url.port_or_known_default(),
        })
    }

    /// Group names in capture order.
    pub fn group_names(&self) -> &[String] {
        &self.names
    }

    fn same_origin(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == self.host.as_deref()
            && url.port_or_known_default() == self.port
    }
}

impl Pattern for PathPattern {
    fn exec(&self, url: &Url) -> Option<PatternMatch> {
        if !self.same_origin(url) {
            return None;
        }

        let captures = self.regex.captures(url.path())?;
        let mut result = PatternMatch::new(url.path());
        for (i, name) in self.names.iter().enumerate() {
            if let Some(value) = captures.get(i + 1) {
                result.groups.insert(name.clone(), value.as_str().to_string());
            }
        }
        Some(result)
    }

    fn test(&self, url: &Url) -> bool {
        self.same_origin(url) && self.regex.is_match(url.path())
    }
}

/// Default [`PatternCompiler`], producing [`PathPattern`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPatternCompiler;

impl PatternCompiler for PathPatternCompiler {
    fn compile(&self, pattern: &str, base_url: &Url) -> Result<Box<dyn Pattern>, PatternError> {
        Ok(Box::new(PathPattern::new(pattern, base_url)?))
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut tokens = Vec::new();
    let mut unnamed = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            '\\' => {
                let &(_, escaped) = chars.get(i + 1).ok_or_else(|| PatternError::Unsupported {
                    pattern: pattern.to_string(),
                    detail: "trailing escape",
                })?;
                tokens.push(Token::Literal(escaped));
                i += 2;
            }
            ':' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && is_name_char(chars[end].1, end == start) {
                    end += 1;
                }
                if end == start {
                    return Err(PatternError::MissingName {
                        pattern: pattern.to_string(),
                        offset,
                    });
                }
                let name: String = chars[start..end].iter().map(|&(_, c)| c).collect();
                i = end;

                let regex = if matches!(chars.get(i), Some(&(_, '('))) {
                    let (regex, next) = read_regex(pattern, &chars, i)?;
                    i = next;
                    regex
                } else {
                    SEGMENT.to_string()
                };
                let modifier = read_modifier(&chars, &mut i);
                tokens.push(Token::Group { name, regex, modifier });
            }
            '(' => {
                let (regex, next) = read_regex(pattern, &chars, i)?;
                i = next;
                let modifier = read_modifier(&chars, &mut i);
                tokens.push(Token::Group {
                    name: unnamed.to_string(),
                    regex,
                    modifier,
                });
                unnamed += 1;
            }
            '*' => {
                i += 1;
                let modifier = read_modifier(&chars, &mut i);
                tokens.push(Token::Group {
                    name: unnamed.to_string(),
                    regex: WILDCARD.to_string(),
                    modifier,
                });
                unnamed += 1;
            }
            ')' => {
                return Err(PatternError::UnbalancedGroup {
                    pattern: pattern.to_string(),
                    offset,
                });
            }
            '{' | '}' => {
                return Err(PatternError::Unsupported {
                    pattern: pattern.to_string(),
                    detail: "`{}` groups",
                });
            }
            _ => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    Ok(tokens)
}

fn is_name_char(c: char, first: bool) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!first && c.is_ascii_digit())
}

/// Reads a parenthesised regex starting at `open`, returning it and the index after `)`.
fn read_regex(
    pattern: &str,
    chars: &[(usize, char)],
    open: usize,
) -> Result<(String, usize), PatternError> {
    let mut depth = 0usize;
    let mut j = open;

    while j < chars.len() {
        match chars[j].1 {
            '\\' => {
                j += 2;
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let regex: String = chars[open + 1..j].iter().map(|&(_, c)| c).collect();
                    if regex.is_empty() {
                        return Err(PatternError::Unsupported {
                            pattern: pattern.to_string(),
                            detail: "empty regex group",
                        });
                    }
                    if Regex::new(&regex)?.captures_len() > 1 {
                        return Err(PatternError::CapturingGroup { regex });
                    }
                    return Ok((regex, j + 1));
                }
            }
            _ => {}
        }
        j += 1;
    }

    Err(PatternError::UnbalancedGroup {
        pattern: pattern.to_string(),
        offset: chars[open].0,
    })
}

fn read_modifier(chars: &[(usize, char)], i: &mut usize) -> Modifier {
    let modifier = match chars.get(*i).map(|&(_, c)| c) {
        Some('?') => Modifier::Optional,
        Some('*') => Modifier::ZeroOrMore,
        Some('+') => Modifier::OneOrMore,
        _ => return Modifier::None,
    };
    *i += 1;
    modifier
}

fn build_regex(pattern: &str, tokens: &[Token]) -> Result<(String, Vec<String>), PatternError> {
    let mut source = String::from("^");
    let mut pending = String::new();
    let mut names: Vec<String> = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(c) => pending.push(*c),
            Token::Group { name, regex, modifier } => {
                if names.contains(name) {
                    return Err(PatternError::DuplicateName {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
                names.push(name.clone());

                let prefix = if *modifier != Modifier::None && pending.ends_with('/') {
                    pending.pop();
                    "/"
                } else {
                    ""
                };
                source.push_str(&escape_literal(&pending));
                pending.clear();

                let group = match modifier {
                    Modifier::None => format!("{prefix}({regex})"),
                    Modifier::Optional => format!("(?:{prefix}({regex}))?"),
                    Modifier::OneOrMore => {
                        format!("(?:{prefix}((?:{regex})(?:{prefix}(?:{regex}))*))")
                    }
                    Modifier::ZeroOrMore => {
                        format!("(?:{prefix}((?:{regex})(?:{prefix}(?:{regex}))*))?")
                    }
                };
                source.push_str(&group);
            }
        }
    }

    source.push_str(&escape_literal(&pending));
    source.push('$');
    Ok((source, names))
}

/// Encode a literal run the way `Url` encodes paths, then escape it for the regex.
fn escape_literal(literal: &str) -> String {
    let encoded: String = utf8_percent_encode(literal, PATH).collect();
    regex::escape(&encoded)
}
