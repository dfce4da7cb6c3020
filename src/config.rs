//! Configuration management for stampscope
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, CONFIG_XDG_FILE_NAME, DEFAULT_PLOT_CATEGORY,
    DEFAULT_PLOT_KIND, DEFAULT_SYNTHETIC_PERIODS, DEFAULT_SYNTHETIC_START, DEFAULT_SYNTHETIC_STEP, FEATURE_COLUMNS,
};
use crate::loader::LoadOptions;
use crate::report::{ChartKind, OutputFormat};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Upper bound on generated periods
const MAX_SYNTHETIC_PERIODS: usize = 10_000_000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub synthetic: SyntheticConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Parameters of the synthetic example run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// First timestamp, e.g. "2025-09-16 02:35:00"
    pub start: String,
    /// Number of timestamps to generate
    pub periods: usize,
    /// Spacing between timestamps, e.g. "14 hours", "30min", "1d"
    pub step: String,
}

/// Input file decoding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field delimiter (single ASCII character)
    pub delimiter: char,
    /// Treat the first line as a header row
    pub has_headers: bool,
}

/// Output and chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Output format: "table", "csv" or "json"
    pub format: OutputFormat,
    /// Feature column charted in file mode
    pub plot_category: String,
    /// Chart kind used in file mode
    pub plot_kind: ChartKind,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Log file; logs go to stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_SYNTHETIC_START.to_string(),
            periods: DEFAULT_SYNTHETIC_PERIODS,
            step: DEFAULT_SYNTHETIC_STEP.to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            plot_category: DEFAULT_PLOT_CATEGORY.to_string(),
            plot_kind: ChartKind::from_str(DEFAULT_PLOT_KIND).unwrap_or(ChartKind::Pie),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl From<&InputConfig> for LoadOptions {
    fn from(input: &InputConfig) -> Self {
        Self {
            // Validated to be ASCII
            delimiter: input.delimiter as u8,
            has_headers: input.has_headers,
        }
    }
}

impl LoggingConfig {
    /// Parsed maximum log level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level)
            .map_err(|e| anyhow::anyhow!("Invalid logging level '{}': {}", self.level, e))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(CONFIG_DIR_NAME).join(CONFIG_XDG_FILE_NAME);
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if datetime::parse_timestamp(&self.synthetic.start).is_none() {
            anyhow::bail!("Invalid synthetic start '{}'", self.synthetic.start);
        }

        if let Err(e) = datetime::parse_step(&self.synthetic.step) {
            anyhow::bail!("Invalid synthetic step '{}': {}", self.synthetic.step, e);
        }

        if self.synthetic.periods > MAX_SYNTHETIC_PERIODS {
            anyhow::bail!(
                "synthetic periods cannot exceed {}, got {}",
                MAX_SYNTHETIC_PERIODS,
                self.synthetic.periods
            );
        }

        if !self.input.delimiter.is_ascii() {
            anyhow::bail!("delimiter must be a single ASCII character, got '{}'", self.input.delimiter);
        }

        if !FEATURE_COLUMNS.contains(&self.display.plot_category.as_str()) {
            anyhow::bail!(
                "plot_category '{}' not found. Available columns: {}",
                self.display.plot_category,
                FEATURE_COLUMNS.join(", ")
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# stampscope Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_XDG_FILE_NAME))
    }
}
