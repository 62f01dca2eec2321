//! Grid configuration builder: validate column descriptors against a dataset.
//!
//! Building is a single pure pass:
//!
//! 1. Column defaults fill unset attributes; numeric formatters imply `end`
//!    alignment when nothing else sets one.
//! 2. Each column is checked: non-empty field, non-empty header, field present
//!    in the dataset schema unless the column is optional.
//! 3. Columns sharing a field must carry the same formatter.
//! 4. At most one sizing strategy may be active across the grid.
//!
//! The first violation is returned as a [`ConfigError`]; column order is
//! always the caller's order.

use std::collections::HashSet;
use tracing::debug;

use super::config::GridConfiguration;
use crate::column::{Alignment, ColumnDefaults, ColumnDescriptor, SizingHint};
use crate::data::Dataset;
use crate::error::ConfigError;
use crate::format::{NumberFormat, ValueFormatter};
use crate::options::{ColumnSize, ErrorPolicy, GridOptions};

/// Assembles a [`GridConfiguration`] from a dataset and column descriptors.
#[derive(Debug, Clone)]
pub struct GridBuilder<'a> {
    dataset: &'a Dataset,
    columns: Vec<ColumnDescriptor>,
    options: GridOptions,
}

impl<'a> GridBuilder<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            columns: Vec::new(),
            options: GridOptions::default(),
        }
    }

    /// Append one column
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Append columns in order
    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Replace all grid options
    pub fn options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    pub fn defaults(mut self, defaults: ColumnDefaults) -> Self {
        self.options.defaults = defaults;
        self
    }

    pub fn column_size(mut self, column_size: ColumnSize) -> Self {
        self.options.column_size = Some(column_size);
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.options.error_policy = policy;
        self
    }

    /// Validate and assemble the configuration.
    pub fn build(self) -> Result<GridConfiguration, ConfigError> {
        let GridBuilder {
            dataset,
            columns,
            options,
        } = self;

        let columns: Vec<ColumnDescriptor> = columns
            .into_iter()
            .map(|column| resolve_column(column, &options.defaults))
            .collect();

        let schema: HashSet<String> = dataset.schema().into_iter().collect();
        for (index, column) in columns.iter().enumerate() {
            validate_column(index, column, &schema)?;
        }
        check_duplicates(&columns)?;
        check_sizing(&columns, options.column_size)?;

        debug!(
            columns = columns.len(),
            rows = dataset.len(),
            column_size = options.column_size.map(ColumnSize::as_str),
            "built grid configuration"
        );

        Ok(GridConfiguration {
            columns,
            rows: dataset.clone(),
            column_size: options.column_size,
            error_policy: options.error_policy,
        })
    }
}

/// Build a grid with default options.
pub fn build(
    dataset: &Dataset,
    column_specs: impl IntoIterator<Item = ColumnDescriptor>,
) -> Result<GridConfiguration, ConfigError> {
    GridBuilder::new(dataset).columns(column_specs).build()
}

fn resolve_column(mut column: ColumnDescriptor, defaults: &ColumnDefaults) -> ColumnDescriptor {
    column.apply_defaults(defaults);
    if column.alignment.is_none() && column.effective_alignment() == Alignment::End {
        column.alignment = Some(Alignment::End);
    }
    column
}

fn validate_column(
    index: usize,
    column: &ColumnDescriptor,
    schema: &HashSet<String>,
) -> Result<(), ConfigError> {
    if column.field.is_empty() {
        return Err(ConfigError::EmptyField { index });
    }
    if column.header_label.trim().is_empty() {
        return Err(ConfigError::EmptyHeader {
            field: column.field.clone(),
        });
    }
    if !schema.contains(&column.field) {
        if !column.optional {
            return Err(ConfigError::UnknownField {
                field: column.field.clone(),
            });
        }
        debug!(field = %column.field, "optional column has no data");
    }
    Ok(())
}

/// Numeric format a column applies; `None` for plain text.
fn applied_format(column: &ColumnDescriptor) -> Option<NumberFormat> {
    column
        .formatter
        .as_ref()
        .and_then(ValueFormatter::number_format)
}

fn check_duplicates(columns: &[ColumnDescriptor]) -> Result<(), ConfigError> {
    for (index, column) in columns.iter().enumerate() {
        let format = applied_format(column);
        let earlier = columns[..index]
            .iter()
            .filter(|other| other.field == column.field);
        for other in earlier {
            if applied_format(other) != format {
                return Err(ConfigError::DuplicateField {
                    field: column.field.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_sizing(
    columns: &[ColumnDescriptor],
    column_size: Option<ColumnSize>,
) -> Result<(), ConfigError> {
    // (active hint, name shown in errors)
    let mut active: Option<(SizingHint, String)> =
        column_size.map(|size| (size.implied_hint(), size.as_str().to_string()));

    for column in columns {
        let hint = match column.sizing_hint {
            None | Some(SizingHint::Fixed) => continue,
            Some(hint) => hint,
        };
        if let Some((current, name)) = &active {
            if *current != hint {
                return Err(ConfigError::ConflictingSizing {
                    field: column.field.clone(),
                    hint: hint.to_string(),
                    active: name.clone(),
                });
            }
        } else {
            active = Some((hint, hint.to_string()));
        }
    }
    Ok(())
}
