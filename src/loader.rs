//! Loading the raw one-column timestamp table.
//!
//! Two sources are supported: a delimited text file and a synthetic generator
//! producing evenly spaced date-times.

use std::path::Path;

use log::{debug, info};

use crate::constants::TIMESTAMP_COLUMN;
use crate::error::{PipelineError, Result};
use crate::table::{Column, Table};
use crate::utils::datetime::{format_timestamp, parse_step, parse_timestamp};

/// Options controlling how an input file is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Whether the first line is a header row
    pub has_headers: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Read a single-column table of raw timestamps from `path`
///
/// The column is renamed to `timestamp` whatever its header said. Values are
/// kept as text; use [`crate::normalize::convert_to_datetime`] to parse them.
///
/// # Errors
/// * [`PipelineError::NotFound`] - `path` does not exist
/// * [`PipelineError::Parse`] - the file cannot be decoded as a table
/// * [`PipelineError::Shape`] - the table does not have exactly one column
pub fn load_from_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let records = reader.records().collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    let width = if options.has_headers {
        headers.len()
    } else {
        records.first().map(|record| record.len()).unwrap_or(0)
    };

    if width == 0 {
        return Err(PipelineError::Parse(format!(
            "no columns to parse from {}",
            path.display()
        )));
    }
    if width != 1 {
        return Err(PipelineError::Shape(width));
    }

    if options.has_headers {
        debug!("Renaming column '{}' to '{}'", &headers[0], TIMESTAMP_COLUMN);
    }

    let values: Vec<String> = records
        .iter()
        .map(|record| record.get(0).unwrap_or_default().to_string())
        .collect();

    info!("Loaded {} rows from {}", values.len(), path.display());
    Ok(Table::new(vec![Column::text(TIMESTAMP_COLUMN, values)]))
}

/// Generate `count` date-times starting at `start`, spaced by `step`
///
/// The returned `timestamp` column already holds date-time values.
///
/// # Errors
/// * [`PipelineError::Generation`] - `start` or `step` cannot be parsed, or the
///   sequence runs past the representable date range
pub fn load_synthetic(start: &str, count: usize, step: &str) -> Result<Table> {
    let first = parse_timestamp(start)
        .ok_or_else(|| PipelineError::Generation(format!("invalid start timestamp '{}'", start)))?;
    let step = parse_step(step).map_err(PipelineError::Generation)?;

    let mut values = Vec::with_capacity(count);
    let mut current = first;
    for index in 0..count {
        if index > 0 {
            current = current.checked_add_signed(step).ok_or_else(|| {
                PipelineError::Generation(format!(
                    "timestamp {} after {} is out of range",
                    index,
                    format_timestamp(&first)
                ))
            })?;
        }
        values.push(current);
    }

    info!(
        "Generated {} timestamps from {} every {}s",
        values.len(),
        format_timestamp(&first),
        step.num_seconds()
    );
    Ok(Table::new(vec![Column::datetime(TIMESTAMP_COLUMN, values)]))
}
