//! In-memory table model shared by every pipeline stage.
//!
//! A [`Table`] is an ordered list of named, equally long [`Column`]s. Stages
//! never mutate their input; each one builds a new table.

use chrono::NaiveDateTime;

use crate::utils::datetime::format_timestamp;

/// Typed payload of a column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Raw, unparsed values
    Text(Vec<String>),
    /// Canonical zone-less date-time values
    DateTime(Vec<NaiveDateTime>),
    /// Derived integer features
    Integer(Vec<i64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(values) => values.len(),
            ColumnData::DateTime(values) => values.len(),
            ColumnData::Integer(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable name of the payload type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Text(_) => "text",
            ColumnData::DateTime(_) => "date-time",
            ColumnData::Integer(_) => "integer",
        }
    }

    /// Render the value at `row` as text
    pub fn display_at(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Text(values) => values.get(row).cloned(),
            ColumnData::DateTime(values) => values.get(row).map(format_timestamp),
            ColumnData::Integer(values) => values.get(row).map(|v| v.to_string()),
        }
    }

    /// Render the value at `row` as a JSON value
    pub fn json_at(&self, row: usize) -> Option<serde_json::Value> {
        match self {
            ColumnData::Text(values) => values.get(row).map(|v| serde_json::Value::from(v.as_str())),
            ColumnData::DateTime(values) => values.get(row).map(|v| serde_json::Value::from(format_timestamp(v))),
            ColumnData::Integer(values) => values.get(row).map(|v| serde_json::Value::from(*v)),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, ColumnData::Text(values))
    }

    pub fn datetime(name: impl Into<String>, values: Vec<NaiveDateTime>) -> Self {
        Self::new(name, ColumnData::DateTime(values))
    }

    pub fn integer(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Integer(values))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered collection of equally long columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns; all columns must have the same length
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|pair| pair[0].len() == pair[1].len()),
            "table columns must have equal length"
        );
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Copy of this table with the column called `name` replaced by `column`
    pub fn with_column_replaced(&self, name: &str, column: Column) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| if c.name == name { column.clone() } else { c.clone() })
            .collect();
        Self::new(columns)
    }
}
