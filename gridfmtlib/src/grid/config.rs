//! The validated grid configuration handed to a rendering host.

use serde::Serialize;
use tracing::{debug, trace};

use crate::column::ColumnDescriptor;
use crate::data::{Dataset, Record};
use crate::error::FormatError;
use crate::format::ValueFormatter;
use crate::options::{ColumnSize, ErrorPolicy};

static PLAIN: ValueFormatter = ValueFormatter::Plain;

/// Columns plus rows, validated and ready to display.
///
/// Serializes to the host-facing shape:
///
/// ```json
/// {
///   "columns": [{"field": "pop", "header": "Population",
///                "formatter": {"kind": "grouped-integer", "args": []},
///                "align": "end"}],
///   "rows": [{"pop": 1282697}],
///   "columnSize": "sizeToFit"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridConfiguration {
    pub(crate) columns: Vec<ColumnDescriptor>,
    pub(crate) rows: Dataset,
    #[serde(rename = "columnSize", skip_serializing_if = "Option::is_none")]
    pub(crate) column_size: Option<ColumnSize>,
    #[serde(skip)]
    pub(crate) error_policy: ErrorPolicy,
}

impl GridConfiguration {
    /// One plain column per schema field, in schema order.
    ///
    /// This is the raw comparison grid: every value shown as-is.
    pub fn unformatted(dataset: &Dataset) -> Self {
        let columns = dataset
            .schema()
            .into_iter()
            .map(ColumnDescriptor::new)
            .collect();
        Self {
            columns,
            rows: dataset.clone(),
            column_size: None,
            error_policy: ErrorPolicy::default(),
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn rows(&self) -> &Dataset {
        &self.rows
    }

    pub fn column_size(&self) -> Option<ColumnSize> {
        self.column_size
    }

    pub fn error_policy(&self) -> &ErrorPolicy {
        &self.error_policy
    }

    /// First column showing `field`.
    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.field == field)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.header_label.as_str())
            .collect()
    }

    /// Set the sizing strategy on an unformatted grid.
    pub fn with_column_size(mut self, column_size: Option<ColumnSize>) -> Self {
        self.column_size = column_size;
        self
    }

    /// Display text of one cell, without applying the error policy.
    pub fn display_cell(
        &self,
        column: &ColumnDescriptor,
        record: &Record,
        row: usize,
    ) -> Result<String, FormatError> {
        let value = record.value(&column.field);
        let formatter = column.formatter.as_ref().unwrap_or(&PLAIN);
        formatter.format(value).map_err(|source| FormatError::Cell {
            field: column.field.clone(),
            row,
            source: Box::new(source),
        })
    }

    /// Display text for every row, columns in configuration order, under the
    /// grid's own error policy.
    pub fn display_rows(&self) -> Result<Vec<Vec<String>>, FormatError> {
        self.display_rows_with(&self.error_policy)
    }

    /// Display text for every row under an explicit error policy.
    pub fn display_rows_with(&self, policy: &ErrorPolicy) -> Result<Vec<Vec<String>>, FormatError> {
        let mut fallbacks = 0usize;
        let mut rows = Vec::with_capacity(self.rows.len());

        for (index, record) in self.rows.records().iter().enumerate() {
            let mut cells = Vec::with_capacity(self.columns.len());
            for column in &self.columns {
                let text = match (self.display_cell(column, record, index), policy) {
                    (Ok(text), _) => text,
                    (Err(err), ErrorPolicy::Propagate) => return Err(err),
                    (Err(err), ErrorPolicy::Fallback(text)) => {
                        trace!(error = %err, "substituting fallback text");
                        fallbacks += 1;
                        text.clone()
                    }
                };
                cells.push(text);
            }
            rows.push(cells);
        }

        if fallbacks > 0 {
            debug!(fallbacks, "rendered grid with fallback cells");
        }
        Ok(rows)
    }
}
