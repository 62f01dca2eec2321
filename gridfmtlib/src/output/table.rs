//! Table-ready data structures for grid output.
//!
//! This module provides `GridTable`, a presentation-ready structure that can
//! be consumed directly by text templates or written out as CSV.
//!
//! The data flow is:
//! 1. Dataset + ColumnDescriptors
//! 2. GridConfiguration (validated)
//! 3. GridTable (display strings, widths and alignment)
//!
//! GridTable is a pure presentation layer: all formatting decisions were made
//! by the column formatters, it only measures and pads.

use serde::{Deserialize, Serialize};

use crate::column::Alignment;
use crate::error::FormatError;
use crate::grid::GridConfiguration;
use crate::Result;

/// A column header with its display width and alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub header: String,
    pub align: Alignment,
    /// Widest of the header and every cell, in characters
    pub width: usize,
}

/// A single row of display strings, one per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

/// Table-ready grid data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTable {
    /// Optional title (e.g., "Gapminder Data with formatting")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl GridTable {
    /// Format every cell of a grid under its error policy.
    pub fn from_grid(grid: &GridConfiguration) -> std::result::Result<Self, FormatError> {
        let rows: Vec<TableRow> = grid
            .display_rows()?
            .into_iter()
            .map(|cells| TableRow { cells })
            .collect();

        let columns = grid
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let widest_cell = rows
                    .iter()
                    .map(|row| display_width(&row.cells[index]))
                    .max()
                    .unwrap_or(0);
                TableColumn {
                    header: column.header_label.clone(),
                    align: column.effective_alignment(),
                    width: widest_cell.max(display_width(&column.header_label)),
                }
            })
            .collect();

        Ok(GridTable {
            title: None,
            columns,
            rows,
        })
    }

    /// Builder: set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Headers padded to their column widths.
    pub fn padded_headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| pad(&column.header, column.width, column.align))
            .collect()
    }

    /// Rows with every cell padded to its column width and alignment.
    pub fn padded_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .zip(&self.columns)
                    .map(|(cell, column)| pad(cell, column.width, column.align))
                    .collect()
            })
            .collect()
    }

    /// Dashes spanning all columns, with one space between columns.
    pub fn separator(&self) -> String {
        let width: usize = self.columns.iter().map(|column| column.width).sum();
        let gaps = self.columns.len().saturating_sub(1);
        "-".repeat(width + gaps)
    }

    /// Headers and display strings as CSV.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.columns.iter().map(|column| column.header.as_str()))?;
        for row in &self.rows {
            writer.write_record(&row.cells)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Pad text to `width` characters according to the alignment.
fn pad(text: &str, width: usize, align: Alignment) -> String {
    match align {
        Alignment::Start => format!("{:<width$}", text, width = width),
        Alignment::End => format!("{:>width$}", text, width = width),
        Alignment::Center => format!("{:^width$}", text, width = width),
    }
}
