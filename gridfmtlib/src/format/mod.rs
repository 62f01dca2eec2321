//! Value formatting: turn raw cell values into display strings.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **NumberFormat**: decimal places, grouping, currency and percent options,
//!   parsed from compact spec strings like `"$,.1f"`
//! - **ValueFormatter**: the named formatter kinds a column can carry
//!
//! Formatting is pure: the same value and formatter always give the same
//! string, and failures are returned as [`FormatError`](crate::FormatError).
//!
//! ## Example
//!
//! ```rust
//! use gridfmtlib::format::{format_value, ValueFormatter};
//! use gridfmtlib::CellValue;
//!
//! let gdp = ValueFormatter::currency("$", 1);
//! assert_eq!(format_value(&CellValue::Number(779.4453), &gdp).unwrap(), "$779.4");
//! ```

pub mod formatter;
pub mod number;

pub use formatter::ValueFormatter;
pub use number::{group_thousands, NumberFormat, NumberKind};

use crate::data::CellValue;
use crate::error::FormatError;

/// Format one value with a formatter.
pub fn format_value(value: &CellValue, formatter: &ValueFormatter) -> Result<String, FormatError> {
    formatter.format(value)
}
