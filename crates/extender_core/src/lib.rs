//! Bundle extender core.
//! Decides which bundles get a managed application context and how it is
//! configured.

pub mod bundle;
pub mod context;
pub mod logging;

pub use bundle::{
    Bundle, BundleError, BundleManifest, BundleResult, DirectoryBundle, InMemoryBundle,
    ManifestParseError,
};
pub use context::{
    ApplicationContextConfiguration, ContextDirective, DirectiveTarget, BUNDLE_PREFIX,
    BUNDLE_URL_PREFIX, CONTEXT_RESOURCE_PATTERN, SPRING_CONTEXT_HEADER,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
