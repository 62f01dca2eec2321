//! Grid-level options.
//!
//! These settings apply to a grid as a whole rather than to one column:
//! column defaults, the sizing strategy, and what to do with values a
//! formatter cannot render.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::column::{ColumnDefaults, SizingHint};

/// Grid-wide column sizing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnSize {
    /// Stretch columns to fill the available width
    SizeToFit,
    /// Size every column to its content
    AutoSizeAll,
}

impl ColumnSize {
    /// The per-column hint this strategy corresponds to.
    pub fn implied_hint(self) -> SizingHint {
        match self {
            ColumnSize::SizeToFit => SizingHint::FillAvailable,
            ColumnSize::AutoSizeAll => SizingHint::FitContent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnSize::SizeToFit => "sizeToFit",
            ColumnSize::AutoSizeAll => "autoSizeAll",
        }
    }
}

impl FromStr for ColumnSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sizeToFit" | "size-to-fit" | "fill" => Ok(ColumnSize::SizeToFit),
            "autoSizeAll" | "auto-size-all" | "fit" => Ok(ColumnSize::AutoSizeAll),
            _ => Err(format!("Unknown column size: {}", s)),
        }
    }
}

/// What display rendering does when a value cannot be formatted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// Return the error to the caller
    #[default]
    Propagate,
    /// Show this text in place of the value
    Fallback(String),
}

impl ErrorPolicy {
    pub fn fallback(text: impl Into<String>) -> Self {
        ErrorPolicy::Fallback(text.into())
    }
}

/// Options for building a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOptions {
    /// Attributes applied to columns that leave them unset
    pub defaults: ColumnDefaults,
    /// Grid-wide sizing strategy
    pub column_size: Option<ColumnSize>,
    /// Handling of unformattable values during display rendering
    pub error_policy: ErrorPolicy,
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set column defaults
    pub fn defaults(mut self, defaults: ColumnDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Builder: set the sizing strategy
    pub fn column_size(mut self, column_size: ColumnSize) -> Self {
        self.column_size = Some(column_size);
        self
    }

    /// Builder: set the error policy
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}
