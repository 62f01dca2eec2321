//! Column-definition files.
//!
//! A [`GridSpec`] is the JSON form of everything a grid needs besides its
//! data:
//!
//! ```json
//! {
//!   "columns": [
//!     {"field": "country", "header": "Country"},
//!     {"field": "pop", "header": "Population", "align": "end",
//!      "formatter": {"kind": "spec", "args": [",.0f"]}}
//!   ],
//!   "defaultColDef": {"sizing": "fill"},
//!   "columnSize": "sizeToFit",
//!   "fallback": "—"
//! }
//! ```
//!
//! `defaultColDef` may also be spelled `defaults`; an empty string or an
//! empty object means no defaults.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use super::builder::GridBuilder;
use super::config::GridConfiguration;
use crate::column::{ColumnDefaults, ColumnDescriptor};
use crate::data::Dataset;
use crate::error::{ConfigError, GridfmtError};
use crate::options::{ColumnSize, ErrorPolicy, GridOptions};
use crate::Result;

/// Declarative grid definition loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: Vec<ColumnDescriptor>,
    #[serde(
        default,
        alias = "defaultColDef",
        deserialize_with = "deserialize_defaults",
        skip_serializing_if = "ColumnDefaults::is_empty"
    )]
    pub defaults: ColumnDefaults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_size: Option<ColumnSize>,
    /// Text shown for unformattable values; errors propagate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefaultsEntry {
    Defaults(ColumnDefaults),
    Blank(String),
}

fn deserialize_defaults<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ColumnDefaults, D::Error> {
    match Option::<DefaultsEntry>::deserialize(deserializer)? {
        None => Ok(ColumnDefaults::default()),
        Some(DefaultsEntry::Defaults(defaults)) => Ok(defaults),
        Some(DefaultsEntry::Blank(text)) if text.trim().is_empty() => {
            Ok(ColumnDefaults::default())
        }
        Some(DefaultsEntry::Blank(text)) => Err(D::Error::custom(format!(
            "column defaults must be an object or empty, got string {:?}",
            text
        ))),
    }
}

impl GridSpec {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GridfmtError::PathNotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path).map_err(|source| GridfmtError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Grid options described by this spec.
    pub fn options(&self) -> GridOptions {
        let mut options = GridOptions::new().defaults(self.defaults.clone());
        if let Some(column_size) = self.column_size {
            options = options.column_size(column_size);
        }
        if let Some(text) = &self.fallback {
            options = options.error_policy(ErrorPolicy::fallback(text.clone()));
        }
        options
    }

    /// Build a grid for `dataset` from this spec.
    pub fn build(&self, dataset: &Dataset) -> std::result::Result<GridConfiguration, ConfigError> {
        GridBuilder::new(dataset)
            .columns(self.columns.iter().cloned())
            .options(self.options())
            .build()
    }
}
