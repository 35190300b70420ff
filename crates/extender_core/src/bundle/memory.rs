//! In-memory bundle with explicit lookup results.
//!
//! Lookup results are configured up front per pattern/path, and every query
//! is counted so callers can assert how often a bundle was consulted.

use super::manifest::BundleManifest;
use super::Bundle;
use std::cell::Cell;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct InMemoryBundle {
    manifest: BundleManifest,
    found: BTreeMap<String, Vec<String>>,
    entries: BTreeMap<String, String>,
    header_lookups: Cell<usize>,
    find_entries_calls: Cell<usize>,
    entry_lookups: Cell<usize>,
}

impl InMemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.manifest.insert(name, value);
        self
    }

    /// Sets the locators returned by `find_entries(pattern)`, in order.
    pub fn with_found_entries<I, S>(mut self, pattern: impl Into<String>, locators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.found.insert(
            pattern.into(),
            locators.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Makes `path` resolvable through `entry(path)`.
    pub fn with_entry(mut self, path: impl Into<String>, locator: impl Into<String>) -> Self {
        self.entries.insert(path.into(), locator.into());
        self
    }

    pub fn header_lookups(&self) -> usize {
        self.header_lookups.get()
    }

    pub fn find_entries_calls(&self) -> usize {
        self.find_entries_calls.get()
    }

    pub fn entry_lookups(&self) -> usize {
        self.entry_lookups.get()
    }
}

impl Bundle for InMemoryBundle {
    fn header(&self, name: &str) -> Option<String> {
        self.header_lookups.set(self.header_lookups.get() + 1);
        self.manifest.get(name).map(str::to_string)
    }

    fn find_entries(&self, pattern: &str) -> Vec<String> {
        self.find_entries_calls
            .set(self.find_entries_calls.get() + 1);
        self.found.get(pattern).cloned().unwrap_or_default()
    }

    fn entry(&self, path: &str) -> Option<String> {
        self.entry_lookups.set(self.entry_lookups.get() + 1);
        self.entries.get(path).cloned()
    }
}
