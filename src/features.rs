//! Calendar feature extraction.

use chrono::{Datelike, NaiveDateTime, Timelike};
use log::debug;

use crate::constants::{
    COLUMN_DAY, COLUMN_HOUR, COLUMN_MONTH, COLUMN_QUARTER, COLUMN_WEEKDAY, COLUMN_YEAR, TIMESTAMP_COLUMN,
};
use crate::error::{PipelineError, Result};
use crate::table::{Column, ColumnData, Table};

/// Calendar fields derived from a single date-time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarParts {
    /// Day of month, 1-31
    pub day: i64,
    /// Month number, 1-12
    pub month: i64,
    pub year: i64,
    /// Hour of day, 0-23
    pub hour: i64,
    /// Day of week, 0 = Monday ... 6 = Sunday
    pub weekday: i64,
    /// Calendar quarter, 1-4
    pub quarter: i64,
}

impl CalendarParts {
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        let month = i64::from(dt.month());
        Self {
            day: i64::from(dt.day()),
            month,
            year: i64::from(dt.year()),
            hour: i64::from(dt.hour()),
            weekday: i64::from(dt.weekday().num_days_from_monday()),
            quarter: (month - 1) / 3 + 1,
        }
    }
}

/// Derive the six calendar feature columns from the `timestamp` column
///
/// The output holds `day`, `month`, `year`, `hour`, `weekday` and `quarter`
/// in that order, one row per input row. The `timestamp` column is dropped.
///
/// # Errors
/// * [`PipelineError::MissingColumn`] - no `timestamp` column
/// * [`PipelineError::Type`] - `timestamp` has not been converted to date-time
pub fn extract_parts(table: &Table) -> Result<Table> {
    let column = table
        .column(TIMESTAMP_COLUMN)
        .ok_or_else(|| PipelineError::MissingColumn(TIMESTAMP_COLUMN.to_string()))?;

    let values = match &column.data {
        ColumnData::DateTime(values) => values,
        other => {
            return Err(PipelineError::Type {
                column: TIMESTAMP_COLUMN.to_string(),
                found: other.type_name(),
            })
        }
    };

    let parts: Vec<CalendarParts> = values.iter().map(CalendarParts::from_datetime).collect();
    let pick = |field: fn(&CalendarParts) -> i64| parts.iter().map(field).collect::<Vec<_>>();

    debug!("Extracted calendar parts for {} rows", parts.len());
    Ok(Table::new(vec![
        Column::integer(COLUMN_DAY, pick(|p| p.day)),
        Column::integer(COLUMN_MONTH, pick(|p| p.month)),
        Column::integer(COLUMN_YEAR, pick(|p| p.year)),
        Column::integer(COLUMN_HOUR, pick(|p| p.hour)),
        Column::integer(COLUMN_WEEKDAY, pick(|p| p.weekday)),
        Column::integer(COLUMN_QUARTER, pick(|p| p.quarter)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FEATURE_COLUMNS;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_calendar_parts() {
        // 2025-09-16 is a Tuesday
        let parts = CalendarParts::from_datetime(&at(2025, 9, 16, 2));
        assert_eq!(
            parts,
            CalendarParts {
                day: 16,
                month: 9,
                year: 2025,
                hour: 2,
                weekday: 1,
                quarter: 3,
            }
        );
    }

    #[test]
    fn test_quarter_boundaries() {
        let quarters: Vec<i64> = (1..=12)
            .map(|month| CalendarParts::from_datetime(&at(2024, month, 1, 0)).quarter)
            .collect();
        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_sunday_is_six() {
        // 2025-09-21 is a Sunday
        assert_eq!(CalendarParts::from_datetime(&at(2025, 9, 21, 23)).weekday, 6);
    }

    #[test]
    fn test_extract_parts_columns() {
        let table = Table::new(vec![Column::datetime(
            TIMESTAMP_COLUMN,
            vec![at(2025, 9, 16, 2), at(2024, 2, 29, 23)],
        )]);
        let features = extract_parts(&table).unwrap();

        assert_eq!(features.column_names(), FEATURE_COLUMNS.to_vec());
        assert_eq!(features.height(), 2);
        assert!(features.column(TIMESTAMP_COLUMN).is_none());
        assert_eq!(
            features.column(COLUMN_DAY).unwrap().data,
            ColumnData::Integer(vec![16, 29])
        );
        assert_eq!(
            features.column(COLUMN_WEEKDAY).unwrap().data,
            ColumnData::Integer(vec![1, 3])
        );
    }

    #[test]
    fn test_extract_parts_requires_datetime() {
        let table = Table::new(vec![Column::text(TIMESTAMP_COLUMN, vec!["2025-09-16".into()])]);
        assert!(matches!(
            extract_parts(&table),
            Err(PipelineError::Type { found: "text", .. })
        ));
    }

    #[test]
    fn test_extract_parts_missing_column() {
        let table = Table::new(vec![Column::integer("day", vec![1])]);
        assert!(matches!(extract_parts(&table), Err(PipelineError::MissingColumn(_))));
    }
}
