//! Constants used throughout the application
//!
//! This module centralizes column names, default pipeline parameters and UI
//! text so the stages and the CLI agree on them.

// Column names
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const COLUMN_DAY: &str = "day";
pub const COLUMN_MONTH: &str = "month";
pub const COLUMN_YEAR: &str = "year";
pub const COLUMN_HOUR: &str = "hour";
pub const COLUMN_WEEKDAY: &str = "weekday";
pub const COLUMN_QUARTER: &str = "quarter";

/// Feature columns in output order
pub const FEATURE_COLUMNS: [&str; 6] = [
    COLUMN_DAY,
    COLUMN_MONTH,
    COLUMN_YEAR,
    COLUMN_HOUR,
    COLUMN_WEEKDAY,
    COLUMN_QUARTER,
];

// Synthetic example defaults
pub const DEFAULT_SYNTHETIC_START: &str = "2025-09-16 02:35:00";
pub const DEFAULT_SYNTHETIC_PERIODS: usize = 15;
pub const DEFAULT_SYNTHETIC_STEP: &str = "14 hours";

// Chart defaults for file mode
pub const DEFAULT_PLOT_CATEGORY: &str = COLUMN_WEEKDAY;
pub const DEFAULT_PLOT_KIND: &str = "pie";

// Config file lookup
pub const CONFIG_FILE_NAME: &str = "stampscope.toml";
pub const CONFIG_DIR_NAME: &str = "stampscope";
pub const CONFIG_XDG_FILE_NAME: &str = "config.toml";

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const EMPTY_TABLE_HEADER: &str = "Empty table";

// Chart viewer
pub const CHART_STATUS_LINE: &str = "q / Esc / Enter: close";
/// Number of bins used by the histogram chart
pub const HISTOGRAM_BINS: usize = 10;
/// Number of evaluation points for the density curve
pub const KDE_POINTS: usize = 200;
