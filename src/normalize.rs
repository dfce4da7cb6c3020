//! Conversion of the raw `timestamp` column to canonical date-time values.

use log::debug;

use crate::constants::TIMESTAMP_COLUMN;
use crate::error::{PipelineError, Result};
use crate::table::{Column, ColumnData, Table};
use crate::utils::datetime::parse_timestamp;

/// Return a copy of `table` whose `timestamp` column holds date-time values
///
/// Parsing is strict: the first value that cannot be parsed aborts the whole
/// conversion. A column that already holds date-times is copied as is.
///
/// # Errors
/// * [`PipelineError::MissingColumn`] - no `timestamp` column
/// * [`PipelineError::Parse`] - a value is not a recognizable timestamp
pub fn convert_to_datetime(table: &Table) -> Result<Table> {
    let column = table
        .column(TIMESTAMP_COLUMN)
        .ok_or_else(|| PipelineError::MissingColumn(TIMESTAMP_COLUMN.to_string()))?;

    let values = match &column.data {
        ColumnData::DateTime(values) => values.clone(),
        ColumnData::Text(values) => values
            .iter()
            .enumerate()
            .map(|(row, value)| {
                parse_timestamp(value).ok_or_else(|| {
                    PipelineError::Parse(format!(
                        "cannot convert '{}' at row {} to a date-time",
                        value, row
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        ColumnData::Integer(_) => {
            return Err(PipelineError::Parse(format!(
                "column '{}' holds integer values, not timestamps",
                TIMESTAMP_COLUMN
            )))
        }
    };

    debug!("Converted {} values to date-time", values.len());
    Ok(table.with_column_replaced(TIMESTAMP_COLUMN, Column::datetime(TIMESTAMP_COLUMN, values)))
}
