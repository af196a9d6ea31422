#![cfg(feature = "file-logging")]

use blog_editor_core::{init_logging, logging_status, LoggingError};

// Logger state is process-wide, so the whole lifecycle runs in one test.
#[test]
fn init_logging_is_idempotent_and_rejects_reconfiguration() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");
    let log_dir_str = log_dir.to_str().unwrap();

    assert_eq!(
        init_logging("info", "relative/logs"),
        Err(LoggingError::RelativeLogDir("relative/logs".to_string()))
    );
    assert_eq!(init_logging("info", "   "), Err(LoggingError::EmptyLogDir));
    assert!(matches!(
        init_logging("loud", log_dir_str),
        Err(LoggingError::UnsupportedLevel(_))
    ));
    assert!(logging_status().is_none());

    init_logging("INFO", log_dir_str).unwrap();
    init_logging("info", log_dir_str).unwrap();
    assert!(log_dir.is_dir());

    let (level, active_dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(active_dir, log_dir);

    assert!(matches!(
        init_logging("debug", log_dir_str),
        Err(LoggingError::AlreadyInitialized { .. })
    ));
    let other = dir.path().join("elsewhere");
    assert!(matches!(
        init_logging("info", other.to_str().unwrap()),
        Err(LoggingError::AlreadyInitialized { .. })
    ));
    assert!(!other.exists());
}
