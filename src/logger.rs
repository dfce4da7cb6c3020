//! Logger setup on top of the `log` facade.
//!
//! Records are dispatched by `fern` either to stderr or to the configured log
//! file, one line per record: `[HH:MM:SS.mmm LEVEL target] message`.

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Format a single log line
pub fn format_line(timestamp: &str, level: log::Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!("[{} {} {}] {}", timestamp, level, target, message)
}

/// Install the global logger
///
/// `verbose` forces logging to stderr at debug level regardless of the
/// configuration. Returns whether a logger was installed.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<bool> {
    if !config.enabled && !verbose {
        return Ok(false);
    }

    let level = if verbose { LevelFilter::Debug } else { config.level_filter()? };

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
            out.finish(format_args!(
                "{}",
                format_line(&timestamp, record.level(), record.target(), message)
            ))
        })
        .level(level);

    let dispatch = match (&config.file, verbose) {
        (Some(path), false) => {
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch.chain(file)
        }
        _ => dispatch.chain(std::io::stderr()),
    };

    dispatch
        .apply()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let config = LoggingConfig::default();
        assert!(!init(&config, false).unwrap());
    }

    #[test]
    fn test_format_line() {
        let line = format_line("02:35:00.000", log::Level::Info, "stampscope::loader", &format_args!("Loaded {} rows", 15));
        assert_eq!(line, "[02:35:00.000 INFO stampscope::loader] Loaded 15 rows");
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggingConfig {
            enabled: true,
            level: "loud".to_string(),
            file: None,
        };
        assert!(init(&config, false).is_err());
    }
}
