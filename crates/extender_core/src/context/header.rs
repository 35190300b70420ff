//! `Spring-Context` manifest header parsing.
//!
//! # Responsibility
//! - Split the header into ordered directives (`target;key:=value,...`).
//! - Extract the `wait-for-dependencies` directive per entry.
//!
//! # Invariants
//! - Parsing never fails; malformed clauses are dropped.
//! - Directive order matches declaration order.

use once_cell::sync::Lazy;
use regex::Regex;

pub const WAIT_FOR_DEPENDENCIES_ATTRIBUTE: &str = "wait-for-dependencies";
pub const WILDCARD_TARGET: &str = "*";

static DIRECTIVE_CLAUSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^\s:=;]+)\s*:=\s*(.*?)\s*$").expect("valid directive clause regex")
});

/// What one header entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveTarget {
    /// `*`: every auto-discovered context resource.
    Wildcard,
    /// A literal path inside the bundle.
    Path(String),
}

/// One comma-separated entry of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDirective {
    /// `None` when the entry only carries clauses, e.g. `;wait-for-dependencies:=false`.
    pub target: Option<DirectiveTarget>,
    /// Parsed `wait-for-dependencies` value; unparseable values are `None`.
    pub wait_for_dependencies: Option<bool>,
    /// All well-formed `key:=value` clauses in declaration order.
    pub clauses: Vec<(String, String)>,
}

impl ContextDirective {
    pub fn is_wildcard(&self) -> bool {
        matches!(self.target, Some(DirectiveTarget::Wildcard))
    }

    pub fn clause(&self, key: &str) -> Option<&str> {
        self.clauses
            .iter()
            .rev()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Parses a header value into its directives. Blank entries are skipped.
pub fn parse_context_header(value: &str) -> Vec<ContextDirective> {
    value
        .split(',')
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_directive)
        .collect()
}

/// Last `wait-for-dependencies` value found across all directives.
pub fn declared_wait_for_dependencies(directives: &[ContextDirective]) -> Option<bool> {
    directives
        .iter()
        .filter_map(|directive| directive.wait_for_dependencies)
        .last()
}

fn parse_directive(segment: &str) -> ContextDirective {
    let mut parts = segment.split(';');
    let target = match parts.next().map(str::trim).unwrap_or_default() {
        "" => None,
        WILDCARD_TARGET => Some(DirectiveTarget::Wildcard),
        path => Some(DirectiveTarget::Path(path.to_string())),
    };

    let clauses: Vec<(String, String)> = parts
        .filter_map(|clause| DIRECTIVE_CLAUSE_RE.captures(clause))
        .map(|captures| {
            let key = captures[1].to_string();
            let value = unquote(&captures[2]).to_string();
            (key, value)
        })
        .collect();

    let wait_for_dependencies = clauses
        .iter()
        .filter(|(key, _)| key == WAIT_FOR_DEPENDENCIES_ATTRIBUTE)
        .filter_map(|(_, value)| parse_bool(value))
        .last();

    ContextDirective {
        target,
        wait_for_dependencies,
        clauses,
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
