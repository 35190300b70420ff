//! Application-context configuration resolved for one bundle.
//!
//! # Responsibility
//! - Decide whether a bundle is Spring-powered.
//! - Produce ordered configuration locations for context creation.
//! - Decide whether context creation waits for dependencies.
//!
//! # Invariants
//! - Resolution happens once, in `new`; the result is immutable.
//! - The bundle header is read once and discovery runs at most once.
//! - Unresolvable header paths are skipped, never reported as errors.
//! - Location order follows header declaration order (discovery order for
//!   wildcard entries or when no header is declared).

use super::header::{
    declared_wait_for_dependencies, parse_context_header, ContextDirective, DirectiveTarget,
};
use crate::bundle::Bundle;
use log::{debug, warn};
use serde::Serialize;

pub const SPRING_CONTEXT_HEADER: &str = "Spring-Context";
pub const CONTEXT_RESOURCE_PATTERN: &str = "META-INF/spring/*.xml";
pub const BUNDLE_PREFIX: &str = "bundle:";
pub const BUNDLE_URL_PREFIX: &str = "bundle-url:";

const DEFAULT_WAIT_FOR_DEPENDENCIES: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationContextConfiguration {
    spring_powered: bool,
    wait_for_dependencies: bool,
    locations: Vec<String>,
    #[serde(skip)]
    declared_in_header: bool,
    #[serde(skip)]
    directives: Vec<ContextDirective>,
}

impl ApplicationContextConfiguration {
    /// Resolves the configuration of `bundle`.
    pub fn new(bundle: &impl Bundle) -> Self {
        let header = bundle
            .header(SPRING_CONTEXT_HEADER)
            .filter(|value| !value.trim().is_empty());

        let configuration = match header {
            Some(value) => Self::from_header(bundle, &value),
            None => Self::from_discovery(bundle),
        };

        debug!(
            "event=context_resolved module=context powered={} locations={} wait={} source={}",
            configuration.spring_powered,
            configuration.locations.len(),
            configuration.wait_for_dependencies,
            if configuration.declared_in_header {
                "header"
            } else {
                "discovery"
            }
        );
        configuration
    }

    fn from_discovery(bundle: &impl Bundle) -> Self {
        let locations = discovered_locations(bundle);
        Self {
            spring_powered: !locations.is_empty(),
            wait_for_dependencies: DEFAULT_WAIT_FOR_DEPENDENCIES,
            locations,
            declared_in_header: false,
            directives: Vec::new(),
        }
    }

    fn from_header(bundle: &impl Bundle, value: &str) -> Self {
        let directives = parse_context_header(value);
        let mut discovered: Option<Vec<String>> = None;
        let mut locations = Vec::new();

        for directive in &directives {
            match &directive.target {
                Some(DirectiveTarget::Wildcard) => {
                    let entries = discovered.get_or_insert_with(|| discovered_locations(bundle));
                    locations.extend(entries.iter().cloned());
                }
                Some(DirectiveTarget::Path(path)) => match bundle.entry(path) {
                    Some(_) => locations.push(format!("{BUNDLE_PREFIX}{path}")),
                    None => warn!(
                        "event=config_location_skipped module=context reason=entry_not_found path={path}"
                    ),
                },
                None => {}
            }
        }

        Self {
            spring_powered: !locations.is_empty(),
            wait_for_dependencies: declared_wait_for_dependencies(&directives)
                .unwrap_or(DEFAULT_WAIT_FOR_DEPENDENCIES),
            locations,
            declared_in_header: true,
            directives,
        }
    }

    /// Whether a managed application context should be created.
    pub fn is_spring_powered_bundle(&self) -> bool {
        self.spring_powered
    }

    /// Whether context creation blocks until dependencies are satisfied.
    ///
    /// Only meaningful for Spring-powered bundles.
    pub fn wait_for_dependencies(&self) -> bool {
        self.wait_for_dependencies
    }

    /// Prefixed configuration locations, in merge order.
    pub fn configuration_locations(&self) -> &[String] {
        &self.locations
    }

    /// Whether the bundle declared a non-blank `Spring-Context` header.
    pub fn declared_in_header(&self) -> bool {
        self.declared_in_header
    }

    /// Parsed header directives; empty without a header.
    pub fn directives(&self) -> &[ContextDirective] {
        &self.directives
    }
}

fn discovered_locations(bundle: &impl Bundle) -> Vec<String> {
    bundle
        .find_entries(CONTEXT_RESOURCE_PATTERN)
        .into_iter()
        .map(|locator| format!("{BUNDLE_URL_PREFIX}{locator}"))
        .collect()
}
