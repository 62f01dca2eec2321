//! Column descriptors: how one data field is displayed.
//!
//! A [`ColumnDescriptor`] binds a field name to a header label, an optional
//! [`ValueFormatter`], an alignment and a sizing hint. [`ColumnDefaults`]
//! holds the attributes applied to every column that leaves them unset.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::ValueFormatter;

/// Horizontal alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Start,
    End,
    Center,
}

/// Per-column width hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizingHint {
    /// Width is pinned; the column opts out of grid sizing
    #[serde(rename = "fixed")]
    Fixed,
    /// Width follows the content
    #[serde(rename = "fit")]
    FitContent,
    /// Width stretches to fill the grid
    #[serde(rename = "fill")]
    FillAvailable,
}

impl fmt::Display for SizingHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizingHint::Fixed => "fixed",
            SizingHint::FitContent => "fit",
            SizingHint::FillAvailable => "fill",
        };
        f.write_str(name)
    }
}

/// Display metadata for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnEntry")]
pub struct ColumnDescriptor {
    /// Dataset field this column shows
    pub field: String,
    /// Header text
    #[serde(rename = "header")]
    pub header_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<ValueFormatter>,
    #[serde(rename = "align", skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(rename = "sizing", skip_serializing_if = "Option::is_none")]
    pub sizing_hint: Option<SizingHint>,
    /// Optional columns may reference fields the dataset lacks
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl ColumnDescriptor {
    /// Column for `field` with a header derived from the field name.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        let header_label = humanize_field(&field);
        Self {
            field,
            header_label,
            formatter: None,
            alignment: None,
            sizing_hint: None,
            optional: false,
        }
    }

    /// Builder: set the header label
    pub fn header(mut self, label: impl Into<String>) -> Self {
        self.header_label = label.into();
        self
    }

    /// Builder: set the value formatter
    pub fn formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Builder: set the alignment
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Builder: align to the end, like a `rightAligned` column type
    pub fn right_aligned(self) -> Self {
        self.align(Alignment::End)
    }

    /// Builder: set the sizing hint
    pub fn sizing(mut self, hint: SizingHint) -> Self {
        self.sizing_hint = Some(hint);
        self
    }

    /// Builder: allow the field to be absent from the dataset
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Alignment used for display: explicit, else `End` for numeric formatters.
    pub fn effective_alignment(&self) -> Alignment {
        match (self.alignment, &self.formatter) {
            (Some(alignment), _) => alignment,
            (None, Some(formatter)) if formatter.is_numeric() => Alignment::End,
            _ => Alignment::Start,
        }
    }

    /// Fill unset attributes from the defaults.
    pub fn apply_defaults(&mut self, defaults: &ColumnDefaults) {
        if self.formatter.is_none() {
            self.formatter = defaults.formatter.clone();
        }
        if self.alignment.is_none() {
            self.alignment = defaults.alignment;
        }
        if self.sizing_hint.is_none() {
            self.sizing_hint = defaults.sizing_hint;
        }
    }
}

/// Deserialization shape: header may be omitted and is then derived.
#[derive(Deserialize)]
struct ColumnEntry {
    field: String,
    header: Option<String>,
    formatter: Option<ValueFormatter>,
    align: Option<Alignment>,
    sizing: Option<SizingHint>,
    #[serde(default)]
    optional: bool,
}

impl From<ColumnEntry> for ColumnDescriptor {
    fn from(entry: ColumnEntry) -> Self {
        let header_label = entry
            .header
            .unwrap_or_else(|| humanize_field(&entry.field));
        Self {
            field: entry.field,
            header_label,
            formatter: entry.formatter,
            alignment: entry.align,
            sizing_hint: entry.sizing,
            optional: entry.optional,
        }
    }
}

/// Attributes applied to every column that leaves them unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<ValueFormatter>,
    #[serde(default, rename = "align", skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, rename = "sizing", skip_serializing_if = "Option::is_none")]
    pub sizing_hint: Option<SizingHint>,
}

impl ColumnDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn sizing(mut self, hint: SizingHint) -> Self {
        self.sizing_hint = Some(hint);
        self
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.formatter.is_none() && self.alignment.is_none() && self.sizing_hint.is_none()
    }
}

/// Header text for a bare field name: `gdpPercap` becomes `Gdp Percap`.
///
/// Words break at `_`, `-`, spaces and lower-to-upper case changes; each word
/// gets an uppercase first letter.
pub fn humanize_field(field: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in field.chars() {
        if matches!(c, '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
