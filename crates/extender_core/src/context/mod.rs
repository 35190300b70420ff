//! Application-context configuration resolution for bundles.
//!
//! # Responsibility
//! - Parse the `Spring-Context` manifest header.
//! - Combine header directives with auto-discovered `META-INF/spring/*.xml`
//!   resources into one resolved decision per bundle.
//!
//! # Invariants
//! - Resolution is a pure function of the bundle's header and entries.
//! - No resolution path returns an error or panics.

pub mod configuration;
pub mod header;

pub use configuration::{
    ApplicationContextConfiguration, BUNDLE_PREFIX, BUNDLE_URL_PREFIX, CONTEXT_RESOURCE_PATTERN,
    SPRING_CONTEXT_HEADER,
};
pub use header::{parse_context_header, ContextDirective, DirectiveTarget};
