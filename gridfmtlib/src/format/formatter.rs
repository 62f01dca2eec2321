//! Named value formatters.
//!
//! A [`ValueFormatter`] is an enumerable formatter kind with explicit
//! arguments. On the wire it is a tagged `{kind, args}` object:
//!
//! ```json
//! {"kind": "currency", "args": ["$", 1]}
//! {"kind": "spec", "args": ["$,.1f"]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::number::NumberFormat;
use crate::data::CellValue;
use crate::error::FormatError;

/// How a column turns raw cell values into display strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "FormatterRepr", try_from = "FormatterRepr")]
pub enum ValueFormatter {
    /// Raw value as text; never fails
    Plain,
    /// `fixed-decimal-places(n)`
    FixedDecimal { places: u8 },
    /// `thousands-grouped-integer`
    GroupedInteger,
    /// `currency-prefixed-decimal(symbol, places)`
    Currency { symbol: String, places: u8 },
    /// Percentage with `places` decimals
    Percent { places: u8 },
    /// A parsed format-spec string such as `$,.1f`
    Spec(NumberFormat),
}

impl ValueFormatter {
    pub fn fixed_decimal(places: u8) -> Self {
        ValueFormatter::FixedDecimal { places }
    }

    pub fn grouped_integer() -> Self {
        ValueFormatter::GroupedInteger
    }

    pub fn currency(symbol: impl Into<String>, places: u8) -> Self {
        ValueFormatter::Currency {
            symbol: symbol.into(),
            places,
        }
    }

    pub fn percent(places: u8) -> Self {
        ValueFormatter::Percent { places }
    }

    /// Parse a format-spec string (`".1f"`, `",.0f"`, `"$,.1f"`).
    pub fn spec(spec: &str) -> Result<Self, FormatError> {
        Ok(ValueFormatter::Spec(spec.parse()?))
    }

    /// Wire name of the formatter kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValueFormatter::Plain => "plain",
            ValueFormatter::FixedDecimal { .. } => "fixed-decimal",
            ValueFormatter::GroupedInteger => "grouped-integer",
            ValueFormatter::Currency { .. } => "currency",
            ValueFormatter::Percent { .. } => "percent",
            ValueFormatter::Spec(_) => "spec",
        }
    }

    /// Whether this formatter requires numeric input.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ValueFormatter::Plain)
    }

    /// The numeric format this formatter applies, if any.
    pub fn number_format(&self) -> Option<NumberFormat> {
        match self {
            ValueFormatter::Plain => None,
            ValueFormatter::FixedDecimal { places } => {
                Some(NumberFormat::fixed(usize::from(*places)))
            }
            ValueFormatter::GroupedInteger => Some(NumberFormat::grouped_integer()),
            ValueFormatter::Currency { symbol, places } => {
                Some(NumberFormat::currency(symbol.clone(), usize::from(*places)))
            }
            ValueFormatter::Percent { places } => {
                Some(NumberFormat::percent(usize::from(*places)))
            }
            ValueFormatter::Spec(format) => Some(format.clone()),
        }
    }

    /// Render one value.
    pub fn format(&self, value: &CellValue) -> Result<String, FormatError> {
        let Some(number_format) = self.number_format() else {
            return Ok(value.to_string());
        };
        match value {
            CellValue::Number(n) => number_format.format(*n),
            other => Err(FormatError::NotNumeric {
                value: other.describe(),
                expected: "number",
            }),
        }
    }
}

impl FromStr for ValueFormatter {
    type Err = FormatError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        ValueFormatter::spec(spec)
    }
}

/// Wire representation: `{kind, args}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FormatterRepr {
    kind: String,
    #[serde(default)]
    args: Vec<Value>,
}

impl From<ValueFormatter> for FormatterRepr {
    fn from(formatter: ValueFormatter) -> Self {
        let kind = formatter.kind().to_string();
        let args = match formatter {
            ValueFormatter::Plain | ValueFormatter::GroupedInteger => vec![],
            ValueFormatter::FixedDecimal { places } | ValueFormatter::Percent { places } => {
                vec![Value::from(places)]
            }
            ValueFormatter::Currency { symbol, places } => {
                vec![Value::from(symbol), Value::from(places)]
            }
            ValueFormatter::Spec(format) => vec![Value::from(format.to_string())],
        };
        FormatterRepr { kind, args }
    }
}

fn arg_count(repr: &FormatterRepr, expected: usize) -> Result<(), String> {
    if repr.args.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "formatter '{}' takes {} argument(s), got {}",
            repr.kind,
            expected,
            repr.args.len()
        ))
    }
}

fn arg_places(repr: &FormatterRepr, index: usize) -> Result<u8, String> {
    repr.args[index]
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .filter(|n| usize::from(*n) <= super::number::MAX_PRECISION)
        .ok_or_else(|| {
            format!(
                "formatter '{}' argument {} must be a decimal place count, got {}",
                repr.kind, index, repr.args[index]
            )
        })
}

fn arg_str(repr: &FormatterRepr, index: usize) -> Result<String, String> {
    repr.args[index]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            format!(
                "formatter '{}' argument {} must be a string, got {}",
                repr.kind, index, repr.args[index]
            )
        })
}

impl TryFrom<FormatterRepr> for ValueFormatter {
    type Error = String;

    fn try_from(repr: FormatterRepr) -> Result<Self, Self::Error> {
        match repr.kind.as_str() {
            "plain" => {
                arg_count(&repr, 0)?;
                Ok(ValueFormatter::Plain)
            }
            "fixed-decimal" => {
                arg_count(&repr, 1)?;
                Ok(ValueFormatter::FixedDecimal {
                    places: arg_places(&repr, 0)?,
                })
            }
            "grouped-integer" => {
                arg_count(&repr, 0)?;
                Ok(ValueFormatter::GroupedInteger)
            }
            "currency" => {
                arg_count(&repr, 2)?;
                Ok(ValueFormatter::Currency {
                    symbol: arg_str(&repr, 0)?,
                    places: arg_places(&repr, 1)?,
                })
            }
            "percent" => {
                arg_count(&repr, 1)?;
                Ok(ValueFormatter::Percent {
                    places: arg_places(&repr, 0)?,
                })
            }
            "spec" => {
                arg_count(&repr, 1)?;
                let spec = arg_str(&repr, 0)?;
                ValueFormatter::spec(&spec).map_err(|e| e.to_string())
            }
            other => Err(format!("unknown formatter kind '{}'", other)),
        }
    }
}
