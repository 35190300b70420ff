//! Exploded bundle backed by a directory on disk.
//!
//! # Responsibility
//! - Load main-section manifest headers from `META-INF/MANIFEST.MF`.
//! - Discover entries by `dir/file-glob` patterns and resolve literal paths.
//!
//! # Invariants
//! - Lookups never leave the bundle root: `..` and prefix components are
//!   rejected, and symlinks must resolve to a path under the root.
//! - Discovery is non-recursive and sorted by file name.
//! - Entry locators are `file://` URLs of canonical paths.

use super::manifest::BundleManifest;
use super::{Bundle, BundleError, BundleResult};
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, info};
use std::path::{Component, Path, PathBuf};

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    root: PathBuf,
    manifest: BundleManifest,
}

impl DirectoryBundle {
    /// Opens a bundle rooted at `root`. A missing manifest yields no headers.
    pub fn open(root: impl AsRef<Path>) -> BundleResult<Self> {
        let requested = root.as_ref();
        let root = match std::fs::canonicalize(requested) {
            Ok(path) if path.is_dir() => path,
            _ => return Err(BundleError::InvalidRoot(requested.to_path_buf())),
        };

        let manifest_path = root.join(MANIFEST_PATH);
        let manifest = if manifest_path.is_file() {
            let text = std::fs::read_to_string(&manifest_path).map_err(|source| {
                BundleError::ManifestIo {
                    path: manifest_path.clone(),
                    source,
                }
            })?;
            BundleManifest::parse(&text).map_err(|source| BundleError::Manifest {
                path: manifest_path.clone(),
                source,
            })?
        } else {
            BundleManifest::new()
        };

        info!(
            "event=bundle_open module=bundle status=ok headers={} root={}",
            manifest.len(),
            root.display()
        );
        Ok(Self { root, manifest })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    /// Lexically joins `path` onto the root; `None` for `..` or prefixes.
    fn locate(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }

    /// Canonical form of `path`, only if it still lies under the root.
    fn confine(&self, path: &Path) -> Option<PathBuf> {
        let canonical = std::fs::canonicalize(path).ok()?;
        canonical.starts_with(&self.root).then_some(canonical)
    }

    /// Canonical regular file under the root, or `None`.
    fn confined_file(&self, path: &Path) -> Option<PathBuf> {
        let canonical = self.confine(path)?;
        if !canonical.is_file() {
            return None;
        }
        Some(canonical)
    }
}

impl Bundle for DirectoryBundle {
    fn header(&self, name: &str) -> Option<String> {
        self.manifest.get(name).map(str::to_string)
    }

    fn find_entries(&self, pattern: &str) -> Vec<String> {
        let (dir, file_glob) = match pattern.rsplit_once('/') {
            Some((dir, file_glob)) => (dir, file_glob),
            None => ("", pattern),
        };
        if dir.contains(['*', '?', '[', '{']) {
            debug!("event=find_entries module=bundle status=skipped reason=wildcard_dir pattern={pattern}");
            return Vec::new();
        }
        let Some(matcher) = file_name_matcher(file_glob) else {
            debug!("event=find_entries module=bundle status=skipped reason=bad_glob pattern={pattern}");
            return Vec::new();
        };
        let Some(dir_path) = self.locate(dir).and_then(|path| self.confine(&path)) else {
            return Vec::new();
        };
        let Ok(read_dir) = std::fs::read_dir(&dir_path) else {
            return Vec::new();
        };

        let mut candidates: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| matcher.is_match(Path::new(name)))
            })
            .collect();
        candidates.sort();

        let locators: Vec<String> = candidates
            .iter()
            .filter_map(|path| self.confined_file(path))
            .filter_map(|canonical| file_url(&canonical))
            .collect();
        debug!(
            "event=find_entries module=bundle status=ok pattern={pattern} matches={}",
            locators.len()
        );
        locators
    }

    fn entry(&self, path: &str) -> Option<String> {
        let resolved = self.locate(path)?;
        let canonical = self.confined_file(&resolved)?;
        file_url(&canonical)
    }
}

fn file_url(path: &Path) -> Option<String> {
    url::Url::from_file_path(path).ok().map(String::from)
}

/// Matcher for one path segment; `*` and `?` never cross `/`.
fn file_name_matcher(glob: &str) -> Option<GlobMatcher> {
    if glob.is_empty() {
        return None;
    }
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .ok()
        .map(|glob| glob.compile_matcher())
}
