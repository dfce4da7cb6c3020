use std::fs;

use stampscope::config::LoggingConfig;
use stampscope::logger;

#[test]
fn test_file_logging() {
    let log_path = std::env::temp_dir().join(format!("stampscope_test_{}.log", std::process::id()));
    let _ = fs::remove_file(&log_path);

    let config = LoggingConfig {
        enabled: true,
        level: "info".to_string(),
        file: Some(log_path.clone()),
    };
    assert!(logger::init(&config, false).unwrap());

    log::info!("Test message with file");
    log::debug!("Filtered out at info level");

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("INFO"));
    assert!(content.contains("Test message with file"));
    assert!(!content.contains("Filtered out"));

    // Clean up test file
    let _ = fs::remove_file(&log_path);
}
