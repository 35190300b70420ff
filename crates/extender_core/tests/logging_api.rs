use extender_core::{init_logging, LogTarget, LoggingError};
use std::path::PathBuf;

#[test]
fn rejected_settings_are_reported_through_root_exports() {
    let err = init_logging("verbose", LogTarget::Stderr).expect_err("unknown level must fail");
    assert_eq!(err, LoggingError::UnsupportedLevel("verbose".to_string()));

    let err = init_logging("info", LogTarget::Directory(PathBuf::from("logs/dev")))
        .expect_err("relative log dir must fail");
    assert!(matches!(err, LoggingError::InvalidDirectory(_)));
}
