//! Input data: scalar values, records and datasets.
//!
//! This module handles the first stage of the pipeline - getting tabular data
//! into memory. It provides:
//!
//! - **CellValue**: the scalar stored in a cell (text, number or null)
//! - **Record**: one row, fields kept in source order
//! - **Dataset**: ordered records plus schema discovery and JSON/CSV loading
//!
//! ## Example
//!
//! ```rust
//! use gridfmtlib::data::{CellValue, Dataset, Record};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new().with("country", "Albania").with("pop", 1282697.0),
//! ]);
//! assert_eq!(dataset.schema(), vec!["country", "pop"]);
//! assert_eq!(dataset.records()[0].value("pop"), &CellValue::Number(1282697.0));
//! ```

pub mod dataset;
pub mod value;

pub use dataset::{Dataset, Record};
pub use value::CellValue;
