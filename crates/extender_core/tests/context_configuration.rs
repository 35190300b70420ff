use extender_core::{ApplicationContextConfiguration, InMemoryBundle, CONTEXT_RESOURCE_PATTERN};

const META_INF_SPRING_CONTENT: [&str; 2] = [
    "file://META-INF/spring/context.xml",
    "file://META-INF/spring/context-two.xml",
];

fn bundle_with_header(value: &str) -> InMemoryBundle {
    InMemoryBundle::new().with_header("Spring-Context", value)
}

fn with_spring_content(bundle: InMemoryBundle) -> InMemoryBundle {
    bundle.with_found_entries(CONTEXT_RESOURCE_PATTERN, META_INF_SPRING_CONTENT)
}

fn with_context_entry(bundle: InMemoryBundle, path: &str) -> InMemoryBundle {
    let locator = format!("file://{path}");
    bundle.with_entry(path, locator)
}

#[test]
fn bundle_without_header_or_spring_resources_is_not_powered() {
    let config = ApplicationContextConfiguration::new(&InMemoryBundle::new());

    assert!(!config.is_spring_powered_bundle());
    assert!(config.configuration_locations().is_empty());
}

#[test]
fn bundle_with_spring_resources_and_no_header_is_powered() {
    let bundle = with_spring_content(InMemoryBundle::new());
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.is_spring_powered_bundle());
}

#[test]
fn bundle_with_resolvable_header_and_no_spring_resources_is_powered() {
    let bundle = with_context_entry(
        bundle_with_header("META-INF/spring/context.xml"),
        "META-INF/spring/context.xml",
    );
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.is_spring_powered_bundle());
    assert_eq!(
        config.configuration_locations(),
        ["bundle:META-INF/spring/context.xml"]
    );
}

#[test]
fn bundle_with_only_unresolvable_header_entries_is_not_powered() {
    let config =
        ApplicationContextConfiguration::new(&bundle_with_header("META-INF/splurge/context.xml"));

    assert!(!config.is_spring_powered_bundle());
    assert!(config.configuration_locations().is_empty());
}

#[test]
fn unresolvable_header_is_not_rescued_by_spring_resources() {
    let bundle = with_spring_content(bundle_with_header("META-INF/splurge/context.xml"));
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(!config.is_spring_powered_bundle());
    assert_eq!(bundle.find_entries_calls(), 0);
}

#[test]
fn bundle_without_header_waits_for_dependencies() {
    let bundle = with_spring_content(InMemoryBundle::new());
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.wait_for_dependencies());
}

#[test]
fn header_without_wait_clause_waits_for_dependencies() {
    let bundle = with_context_entry(
        bundle_with_header("META-INF/spring/context.xml"),
        "META-INF/spring/context.xml",
    );
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.wait_for_dependencies());
}

#[test]
fn wait_true_waits_for_dependencies() {
    let bundle = with_spring_content(bundle_with_header("*;wait-for-dependencies:=true"));
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.wait_for_dependencies());
}

#[test]
fn wait_false_applies_regardless_of_directive_position() {
    for header in [
        "*;wait-for-dependencies:=false",
        "META-INF/spring/context.xml,*;wait-for-dependencies:=false",
        "META-INF/spring/context.xml;wait-for-dependencies:=false,*",
        "*,META-INF/spring/context.xml;wait-for-dependencies:=false,META-INF/spring/context-two.xml",
    ] {
        let bundle = with_context_entry(
            with_spring_content(bundle_with_header(header)),
            "META-INF/spring/context.xml",
        );
        let config = ApplicationContextConfiguration::new(&bundle);

        assert!(
            !config.wait_for_dependencies(),
            "header `{header}` should not wait for dependencies"
        );
    }
}

#[test]
fn malformed_wait_value_keeps_default() {
    let bundle = with_spring_content(bundle_with_header("*;wait-for-dependencies:=maybe"));
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.is_spring_powered_bundle());
    assert!(config.wait_for_dependencies());
}

#[test]
fn conflicting_wait_values_take_the_last_one() {
    let bundle = with_spring_content(bundle_with_header(
        "*;wait-for-dependencies:=true,META-INF/spring/context.xml;wait-for-dependencies:=false",
    ));
    let config = ApplicationContextConfiguration::new(&bundle);
    assert!(!config.wait_for_dependencies());

    let bundle = with_spring_content(bundle_with_header(
        "*;wait-for-dependencies:=false,META-INF/spring/context.xml;wait-for-dependencies:=true",
    ));
    let config = ApplicationContextConfiguration::new(&bundle);
    assert!(config.wait_for_dependencies());
}

#[test]
fn config_locations_in_meta_inf_without_header() {
    let bundle = with_spring_content(InMemoryBundle::new());
    let config = ApplicationContextConfiguration::new(&bundle);

    assert_eq!(
        config.configuration_locations(),
        [
            "bundle-url:file://META-INF/spring/context.xml",
            "bundle-url:file://META-INF/spring/context-two.xml",
        ]
    );
}

#[test]
fn config_locations_with_literal_header_ignore_discovery() {
    let bundle = with_context_entry(
        with_spring_content(bundle_with_header("META-INF/spring/context.xml")),
        "META-INF/spring/context.xml",
    );
    let config = ApplicationContextConfiguration::new(&bundle);

    assert_eq!(
        config.configuration_locations(),
        ["bundle:META-INF/spring/context.xml"]
    );
}

#[test]
fn config_locations_with_wildcard_header() {
    let bundle = with_spring_content(bundle_with_header("*;wait-for-dependencies:=false"));
    let config = ApplicationContextConfiguration::new(&bundle);

    assert_eq!(
        config.configuration_locations(),
        [
            "bundle-url:file://META-INF/spring/context.xml",
            "bundle-url:file://META-INF/spring/context-two.xml",
        ]
    );
    assert!(!config.wait_for_dependencies());
}

#[test]
fn config_locations_follow_header_declaration_order() {
    let bundle = with_context_entry(
        with_context_entry(
            with_spring_content(bundle_with_header(
                "OSGI-INF/extra.xml,*,META-INF/other/late.xml",
            )),
            "OSGI-INF/extra.xml",
        ),
        "META-INF/other/late.xml",
    );
    let config = ApplicationContextConfiguration::new(&bundle);

    assert_eq!(
        config.configuration_locations(),
        [
            "bundle:OSGI-INF/extra.xml",
            "bundle-url:file://META-INF/spring/context.xml",
            "bundle-url:file://META-INF/spring/context-two.xml",
            "bundle:META-INF/other/late.xml",
        ]
    );
}

#[test]
fn wildcard_header_without_spring_resources_is_not_powered() {
    let config =
        ApplicationContextConfiguration::new(&bundle_with_header("*;wait-for-dependencies:=false"));

    assert!(!config.is_spring_powered_bundle());
    assert!(config.configuration_locations().is_empty());
}

#[test]
fn header_with_bad_entry_and_trailing_comma_keeps_resolvable_entry() {
    let bundle = with_context_entry(
        bundle_with_header("META-INF/spring/context-two.xml,META-INF/splurge/context.xml,"),
        "META-INF/spring/context-two.xml",
    );
    let config = ApplicationContextConfiguration::new(&bundle);

    assert!(config.is_spring_powered_bundle());
    assert_eq!(
        config.configuration_locations(),
        ["bundle:META-INF/spring/context-two.xml"]
    );
    assert_eq!(config.directives().len(), 2);
}

#[test]
fn bundle_is_queried_at_most_once_per_lookup_kind() {
    let bundle = with_spring_content(bundle_with_header("*,*;wait-for-dependencies:=false,*"));
    let config = ApplicationContextConfiguration::new(&bundle);

    assert_eq!(config.configuration_locations().len(), 6);
    assert_eq!(bundle.header_lookups(), 1);
    assert_eq!(bundle.find_entries_calls(), 1);

    let _ = config.is_spring_powered_bundle();
    let _ = config.wait_for_dependencies();
    let _ = config.configuration_locations();
    assert_eq!(bundle.header_lookups(), 1);
    assert_eq!(bundle.find_entries_calls(), 1);
}

#[test]
fn serialized_report_exposes_the_decision() {
    let bundle = with_spring_content(bundle_with_header("*;wait-for-dependencies:=false"));
    let config = ApplicationContextConfiguration::new(&bundle);

    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "spring_powered": true,
            "wait_for_dependencies": false,
            "locations": [
                "bundle-url:file://META-INF/spring/context.xml",
                "bundle-url:file://META-INF/spring/context-two.xml",
            ],
        })
    );
}

#[test]
fn malformed_headers_never_panic() {
    for header in [
        ";", ";;;", ",;,", "*;", "*;:=", "*;=:=x", ":=", "  ;wait-for-dependencies:=", "\t,\n",
        "a.xml;wait-for-dependencies:=false;wait-for-dependencies",
    ] {
        let bundle = with_spring_content(bundle_with_header(header));
        let config = ApplicationContextConfiguration::new(&bundle);
        let _ = config.configuration_locations();
    }
}
