//! stampscope - calendar features from a column of timestamps
//!
//! This library loads a one-column table of timestamps (from a delimited file
//! or a synthetic generator), converts it to date-time values, derives the
//! calendar features day, month, year, hour, weekday and quarter, prints the
//! result and charts the value counts of one feature in the terminal.
//!
//! # Modules
//!
//! The pipeline runs strictly in this order, each stage returning a new table:
//!
//! * [`loader`] - Raw table from a file or a synthetic generator
//! * [`normalize`] - Strict conversion of the `timestamp` column to date-time
//! * [`features`] - Calendar feature extraction
//! * [`report`] - Table printing and chart dispatch
//!
//! Supporting modules:
//!
//! * [`config`] - Application configuration management
//! * [`ui`] - Terminal chart viewer built with Ratatui
//! * [`utils`] - Timestamp and duration parsing helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Error types shared by the pipeline stages
pub mod error;

/// Calendar feature extraction
pub mod features;

/// Raw table loading from files or a synthetic generator
pub mod loader;

/// Logger setup for the `log` facade
pub mod logger;

/// Conversion of raw timestamps to date-time values
pub mod normalize;

/// Table printing and charting
pub mod report;

/// In-memory table model
pub mod table;

/// Terminal user interface for charts
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;

pub use error::{PipelineError, Result};
pub use table::{Column, ColumnData, Table};

/// Run the normalizer and the feature extractor on a raw table
pub fn derive_features(raw: &Table) -> Result<Table> {
    let canonical = normalize::convert_to_datetime(raw)?;
    features::extract_parts(&canonical)
}
