//! Bundle capability contract and concrete bundle sources.
//!
//! # Responsibility
//! - Define the read-only view of a deployable bundle used by context
//!   resolution: manifest header lookup, entry discovery, path resolution.
//! - Provide an in-memory bundle and an exploded on-disk bundle.
//!
//! # Invariants
//! - Every lookup is infallible from the caller's point of view; a missing
//!   header or entry is `None`/empty, never an error.
//! - `find_entries` preserves the bundle's discovery order.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod directory;
pub mod manifest;
pub mod memory;

pub use directory::DirectoryBundle;
pub use manifest::{BundleManifest, ManifestParseError};
pub use memory::InMemoryBundle;

/// Read-only lookups a bundle exposes to the extender.
pub trait Bundle {
    /// Returns the raw value of one main-section manifest header.
    fn header(&self, name: &str) -> Option<String>;

    /// Returns entry locators matching `pattern` (`dir/file-glob`).
    fn find_entries(&self, pattern: &str) -> Vec<String>;

    /// Resolves one literal bundle path to its entry locator.
    fn entry(&self, path: &str) -> Option<String>;
}

impl<B: Bundle + ?Sized> Bundle for &B {
    fn header(&self, name: &str) -> Option<String> {
        (**self).header(name)
    }

    fn find_entries(&self, pattern: &str) -> Vec<String> {
        (**self).find_entries(pattern)
    }

    fn entry(&self, path: &str) -> Option<String> {
        (**self).entry(path)
    }
}

pub type BundleResult<T> = Result<T, BundleError>;

/// Errors raised while opening a bundle source.
#[derive(Debug)]
pub enum BundleError {
    /// Bundle root does not exist or is not a directory.
    InvalidRoot(PathBuf),
    /// Manifest file exists but could not be read.
    ManifestIo {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Manifest file is not valid manifest syntax.
    Manifest {
        path: PathBuf,
        source: ManifestParseError,
    },
}

impl Display for BundleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot(path) => {
                write!(f, "bundle root is not a directory: {}", path.display())
            }
            Self::ManifestIo { path, source } => {
                write!(f, "failed to read manifest `{}`: {source}", path.display())
            }
            Self::Manifest { path, source } => {
                write!(f, "invalid manifest `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for BundleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRoot(_) => None,
            Self::ManifestIo { source, .. } => Some(source),
            Self::Manifest { source, .. } => Some(source),
        }
    }
}
