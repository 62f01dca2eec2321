//! # gridfmtlib
//!
//! Declarative column formatting for tabular grids.
//!
//! ## Overview
//!
//! Dashboard grids usually describe formatting as snippets of client-side
//! code handed to the widget. This library replaces those snippets with a
//! typed, testable configuration model:
//!
//! - **Values**: datasets of records holding text, numbers or null
//! - **Formatters**: named formatter kinds with explicit arguments
//!   (`fixed-decimal`, `grouped-integer`, `currency`, `percent`, spec strings
//!   like `"$,.1f"`)
//! - **Columns**: field, header, formatter, alignment and sizing hint
//! - **Grids**: columns validated against a dataset, ready for a rendering host
//!
//! ## Features
//!
//! - **Pure**: formatting and validation have no side effects; the same
//!   inputs always produce the same configuration
//! - **Early errors**: unknown fields, conflicting duplicates and mixed sizing
//!   strategies are configuration errors, unformattable values are format errors
//! - **Serializable**: configurations serialize to the `{columns, rows}` shape a
//!   host consumes; formatters serialize as `{kind, args}`
//!
//! ## Example
//!
//! ```rust
//! use gridfmtlib::{build, ColumnDescriptor, Dataset, Record, ValueFormatter};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new()
//!         .with("country", "Afghanistan")
//!         .with("lifeExp", 28.801)
//!         .with("pop", 8425333.0)
//!         .with("gdpPercap", 779.4453145),
//! ]);
//!
//! let grid = build(
//!     &dataset,
//!     vec![
//!         ColumnDescriptor::new("country").header("Country"),
//!         ColumnDescriptor::new("lifeExp")
//!             .header("Life Expectancy")
//!             .formatter(ValueFormatter::fixed_decimal(1)),
//!         ColumnDescriptor::new("pop")
//!             .header("Population")
//!             .formatter(ValueFormatter::grouped_integer()),
//!         ColumnDescriptor::new("gdpPercap")
//!             .header("GDP per Capita")
//!             .formatter(ValueFormatter::currency("$", 1)),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     grid.display_rows().unwrap()[0],
//!     vec!["Afghanistan", "28.8", "8,425,333", "$779.4"]
//! );
//! ```

pub mod column;
pub mod data;
pub mod error;
pub mod format;
pub mod grid;
pub mod options;
pub mod output;

pub use column::{humanize_field, Alignment, ColumnDefaults, ColumnDescriptor, SizingHint};
pub use data::{CellValue, Dataset, Record};
pub use error::{ConfigError, FormatError, GridfmtError};
pub use format::{format_value, NumberFormat, NumberKind, ValueFormatter};
pub use grid::{build, GridBuilder, GridConfiguration, GridSpec};
pub use options::{ColumnSize, ErrorPolicy, GridOptions};
pub use output::{GridTable, TableColumn, TableRow};

/// Result type for gridfmtlib operations
pub type Result<T> = std::result::Result<T, GridfmtError>;
