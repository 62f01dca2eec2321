//! Output formatting: present grids as tables.
//!
//! This module handles the fourth and final stage of the pipeline - turning a
//! validated grid into something a text host can print. It provides:
//!
//! - **GridTable**: headers, display rows, column widths and alignment
//! - **TableColumn** / **TableRow**: the pieces of a GridTable
//!
//! ## Example
//!
//! ```rust
//! use gridfmtlib::output::GridTable;
//! use gridfmtlib::{Dataset, GridConfiguration, Record};
//!
//! let dataset = Dataset::new(vec![Record::new().with("year", 1952.0)]);
//! let table = GridTable::from_grid(&GridConfiguration::unformatted(&dataset)).unwrap();
//! assert_eq!(table.padded_headers(), vec!["Year"]);
//! ```

pub mod table;

pub use table::{GridTable, TableColumn, TableRow};
