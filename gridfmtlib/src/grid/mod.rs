//! Grid assembly: validate columns against data and produce configurations.
//!
//! This module handles the third stage of the pipeline. It provides:
//!
//! - **GridBuilder**: collects columns and options, then validates them
//!   against a dataset in one pass
//! - **GridConfiguration**: the immutable result handed to a rendering host
//! - **GridSpec**: the JSON column-definition file format
//!
//! ## Example
//!
//! ```rust
//! use gridfmtlib::{build, ColumnDescriptor, Dataset, Record, ValueFormatter};
//!
//! let dataset = Dataset::new(vec![Record::new().with("pop", 1282697.0)]);
//! let grid = build(
//!     &dataset,
//!     vec![ColumnDescriptor::new("pop").formatter(ValueFormatter::grouped_integer())],
//! )
//! .unwrap();
//! assert_eq!(grid.display_rows().unwrap(), vec![vec!["1,282,697"]]);
//! ```

pub mod builder;
pub mod config;
pub mod spec_file;

pub use builder::{build, GridBuilder};
pub use config::GridConfiguration;
pub use spec_file::GridSpec;
