//! Reporting: printing a table and charting the value counts of one column.
//!
//! Printing follows a fixed serialization contract so output can be compared
//! byte for byte. Chart drawing is delegated to a [`ChartRenderer`], which
//! keeps this module free of terminal side effects.

pub mod chart;

use std::collections::HashMap;
use std::io::{self, Write};

use log::info;
use serde::{Deserialize, Serialize};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Padding, Style},
};

use crate::constants::EMPTY_TABLE_HEADER;
use crate::error::{PipelineError, Result};
use crate::table::Table;

pub use chart::{ChartKind, ValueCounts};

/// How [`write_table`] serializes a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns with a row index gutter
    #[default]
    Table,
    Csv,
    /// Pretty-printed array of row objects
    Json,
}

/// Capability to draw value counts as a chart
pub trait ChartRenderer {
    fn render(&mut self, counts: &ValueCounts, kind: ChartKind) -> Result<()>;
}

/// Print `table` to standard output
pub fn print_table(table: &Table, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_table(&mut handle, table, format)?;
    handle.flush()?;
    Ok(())
}

/// Serialize `table` to `out` in the requested format
///
/// The `Table` layout is: a blank index gutter as wide as the largest row
/// index, then every column name right-aligned to its column width, columns
/// separated by two spaces. Each row starts with its 0-based index
/// left-aligned in the gutter, followed by the right-aligned values.
pub fn write_table<W: Write>(out: &mut W, table: &Table, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_aligned(out, table)?,
        OutputFormat::Csv => write_csv(out, table)?,
        OutputFormat::Json => write_json(out, table)?,
    }
    Ok(())
}

fn write_aligned<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    if table.is_empty() {
        writeln!(out, "{}", EMPTY_TABLE_HEADER)?;
        writeln!(out, "Columns: [{}]", table.column_names().join(", "))?;
        writeln!(out, "Index: []")?;
        return Ok(());
    }

    let rows = table.height();
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(String::new()).chain(table.column_names().into_iter().map(String::from)));
    for row in 0..rows {
        let values = table
            .columns()
            .iter()
            .map(|column| column.data.display_at(row).unwrap_or_default());
        builder.push_record(std::iter::once(row.to_string()).chain(values));
    }

    // Blank style separates columns with one space; the left padding adds the second
    let mut grid = builder.build();
    grid.with(Style::blank())
        .modify(Columns::first(), Padding::zero())
        .modify(Columns::first(), Alignment::left())
        .modify(Columns::new(1..), Padding::new(1, 0, 0, 0))
        .modify(Columns::new(1..), Alignment::right());
    writeln!(out, "{}", grid)
}

fn write_csv<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(&mut *out);
    writer.write_record(table.column_names()).map_err(io::Error::from)?;
    for row in 0..table.height() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| column.data.display_at(row).unwrap_or_default())
            .collect();
        writer.write_record(&record).map_err(io::Error::from)?;
    }
    writer.flush()
}

fn write_json<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = (0..table.height())
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|column| {
                    let value = column.data.json_at(row).unwrap_or(serde_json::Value::Null);
                    (column.name.clone(), value)
                })
                .collect()
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows).map_err(io::Error::from)?;
    writeln!(out)
}

/// Count how often each distinct value of `category` occurs
///
/// # Errors
/// * [`PipelineError::MissingColumn`] - `category` is not a column of `table`
pub fn value_counts(table: &Table, category: &str) -> Result<ValueCounts> {
    let column = table
        .column(category)
        .ok_or_else(|| PipelineError::MissingColumn(category.to_string()))?;

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();
    for row in 0..column.len() {
        let value = column.data.display_at(row).unwrap_or_default();
        match positions.get(&value) {
            Some(&idx) => entries[idx].1 += 1,
            None => {
                positions.insert(value.clone(), entries.len());
                entries.push((value, 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ValueCounts {
        category: category.to_string(),
        entries,
    })
}

/// Chart the value counts of `category` as `kind` through `renderer`
///
/// The category is validated before the kind.
///
/// # Errors
/// * [`PipelineError::MissingColumn`] - `category` is not a column of `table`
/// * [`PipelineError::InvalidKind`] - `kind` is not a supported chart kind
pub fn plot(table: &Table, category: &str, kind: &str, renderer: &mut dyn ChartRenderer) -> Result<()> {
    if table.column(category).is_none() {
        return Err(PipelineError::MissingColumn(category.to_string()));
    }
    let kind: ChartKind = kind.parse()?;
    let counts = value_counts(table, category)?;

    info!(
        "Plotting {} distinct '{}' values as {}",
        counts.entries.len(),
        category,
        kind
    );
    renderer.render(&counts, kind)
}
