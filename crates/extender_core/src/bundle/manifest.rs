//! `META-INF/MANIFEST.MF` main-section parser.
//!
//! # Invariants
//! - Only the main section is retained; per-entry sections after the first
//!   blank line are ignored.
//! - Header names compare case-insensitively; a repeated name replaces the
//!   earlier value while keeping its original position.
//! - Continuation lines start with exactly one space, which is dropped.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Parsed main section of a bundle manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleManifest {
    headers: Vec<(String, String)>,
}

impl BundleManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses manifest text. Accepts CRLF, LF and lone CR line endings.
    pub fn parse(text: &str) -> Result<Self, ManifestParseError> {
        let mut manifest = Self::new();
        let mut current: Option<(String, String)> = None;
        let mut seen_header = false;

        for (index, line) in manifest_lines(text).enumerate() {
            let line_no = index + 1;

            if line.is_empty() {
                if seen_header {
                    break;
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix(' ') {
                match current.as_mut() {
                    Some((_, value)) => value.push_str(rest),
                    None => return Err(ManifestParseError::OrphanContinuation { line: line_no }),
                }
                continue;
            }

            if let Some((name, value)) = current.take() {
                manifest.insert(name, value);
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(ManifestParseError::MissingSeparator { line: line_no });
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(ManifestParseError::EmptyName { line: line_no });
            }
            let value = value.strip_prefix(' ').unwrap_or(value);
            current = Some((name.to_string(), value.to_string()));
            seen_header = true;
        }

        if let Some((name, value)) = current.take() {
            manifest.insert(name, value);
        }
        Ok(manifest)
    }

    /// Sets one header value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Headers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Splits on `\r\n`, `\n` or a lone `\r`; a final line break adds no line.
fn manifest_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(at) => {
                let line = &rest[..at];
                let skip = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[at + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Manifest syntax errors, with 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestParseError {
    MissingSeparator { line: usize },
    OrphanContinuation { line: usize },
    EmptyName { line: usize },
}

impl Display for ManifestParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSeparator { line } => {
                write!(f, "line {line}: header is missing `:` separator")
            }
            Self::OrphanContinuation { line } => {
                write!(f, "line {line}: continuation line without a preceding header")
            }
            Self::EmptyName { line } => write!(f, "line {line}: header name must not be empty"),
        }
    }
}

impl Error for ManifestParseError {}
