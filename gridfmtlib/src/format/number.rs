//! Numeric display formats.
//!
//! [`NumberFormat`] covers the handful of options grid columns need: decimal
//! places, thousands grouping, a currency prefix and percentage scaling. It
//! also parses the compact spec syntax used by dashboard formatters:
//!
//! ```text
//! [$][,][.precision][type]     type: f (fixed, default), d (integer), % (percent)
//! ```
//!
//! `".1f"`, `",.0f"` and `"$,.1f"` are the three specs the gapminder grid uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Precision used when a spec omits `.N` for `f` and `%`.
pub const DEFAULT_PRECISION: usize = 6;

/// Largest precision a spec may request.
pub const MAX_PRECISION: usize = 20;

/// How the number itself is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    /// Fixed number of decimal places
    #[default]
    Fixed,
    /// Integral values only, no decimals
    Integer,
    /// Multiply by 100, fixed decimals, `%` suffix
    Percent,
}

/// A parsed numeric display format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberFormat {
    pub kind: NumberKind,
    /// Decimal places (always 0 for `Integer`)
    pub places: usize,
    /// Insert `,` between groups of three integer digits
    pub grouping: bool,
    /// Prefix placed after the sign, e.g. `$`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::fixed(DEFAULT_PRECISION)
    }
}

impl NumberFormat {
    /// Fixed decimal places, no grouping.
    pub fn fixed(places: usize) -> Self {
        Self {
            kind: NumberKind::Fixed,
            places,
            grouping: false,
            currency: None,
        }
    }

    /// Rounded to an integer with thousands grouping (`,.0f`).
    pub fn grouped_integer() -> Self {
        Self::fixed(0).with_grouping(true)
    }

    /// Currency prefix, thousands grouping and fixed places (`$,.Nf`).
    pub fn currency(symbol: impl Into<String>, places: usize) -> Self {
        Self::fixed(places)
            .with_grouping(true)
            .with_currency(symbol)
    }

    /// Percentage with fixed places (`.N%`).
    pub fn percent(places: usize) -> Self {
        Self {
            kind: NumberKind::Percent,
            places,
            grouping: false,
            currency: None,
        }
    }

    /// Strict integer format (`d`); fractional values are rejected.
    pub fn integer() -> Self {
        Self {
            kind: NumberKind::Integer,
            places: 0,
            grouping: false,
            currency: None,
        }
    }

    /// Builder: toggle thousands grouping
    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }

    /// Builder: set the currency prefix
    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = Some(symbol.into());
        self
    }

    /// Render a number.
    pub fn format(&self, value: f64) -> Result<String, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::NonFinite(value));
        }

        let (scaled, places) = match self.kind {
            NumberKind::Fixed => (value, self.places),
            NumberKind::Integer => {
                if value.fract() != 0.0 {
                    return Err(FormatError::NotInteger(value));
                }
                (value, 0)
            }
            NumberKind::Percent => (value * 100.0, self.places),
        };
        if !scaled.is_finite() {
            return Err(FormatError::NonFinite(scaled));
        }

        let digits = round_half_away(scaled.abs(), places);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        // Values that round to zero lose their sign: -0.04 with one place is "0.0"
        let negative = scaled < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let mut out = String::with_capacity(digits.len() + 8);
        if negative {
            out.push('-');
        }
        if let Some(symbol) = &self.currency {
            out.push_str(symbol);
        }
        if self.grouping {
            out.push_str(&group_thousands(int_part));
        } else {
            out.push_str(int_part);
        }
        if let Some(frac_part) = frac_part {
            out.push('.');
            out.push_str(frac_part);
        }
        if self.kind == NumberKind::Percent {
            out.push('%');
        }
        Ok(out)
    }
}

/// Fraction digits needed to write any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Decimal digits of a non-negative `value` rounded to `places`, with exact
/// ties rounded up.
///
/// Rounding works on the exact decimal expansion, so `0.25` gives `0.3` while
/// `1.005` (stored just below the tie) gives `1.00` at two places.
fn round_half_away(value: f64, places: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();
    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 1);
    out.extend(digits[..int_len].iter().map(|&d| char::from(d)));
    if places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| char::from(d)));
    }
    out
}

/// Insert `,` between groups of three digits, counting from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn invalid(spec: &str, message: impl Into<String>) -> FormatError {
    FormatError::InvalidSpec {
        spec: spec.to_string(),
        message: message.into(),
    }
}

impl FromStr for NumberFormat {
    type Err = FormatError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        if spec.is_empty() {
            return Err(invalid(spec, "empty spec"));
        }

        let mut rest = spec;
        let currency = rest.strip_prefix('$').map(|tail| {
            rest = tail;
            "$".to_string()
        });
        let grouping = match rest.strip_prefix(',') {
            Some(tail) => {
                rest = tail;
                true
            }
            None => false,
        };

        let mut precision = None;
        if let Some(tail) = rest.strip_prefix('.') {
            let end = tail
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(tail.len());
            if end == 0 {
                return Err(invalid(spec, "expected digits after '.'"));
            }
            let places: usize = tail[..end]
                .parse()
                .map_err(|_| invalid(spec, "precision out of range"))?;
            if places > MAX_PRECISION {
                return Err(invalid(
                    spec,
                    format!("precision {} exceeds {}", places, MAX_PRECISION),
                ));
            }
            precision = Some(places);
            rest = &tail[end..];
        }

        let kind = match rest {
            "" | "f" => NumberKind::Fixed,
            "d" => NumberKind::Integer,
            "%" => NumberKind::Percent,
            other => return Err(invalid(spec, format!("unsupported type '{}'", other))),
        };

        let places = match kind {
            NumberKind::Integer => 0,
            _ => precision.unwrap_or(DEFAULT_PRECISION),
        };

        Ok(Self {
            kind,
            places,
            grouping,
            currency,
        })
    }
}

/// Spec form of the format. Currency symbols other than `$` are written
/// verbatim and do not parse back.
impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = &self.currency {
            f.write_str(symbol)?;
        }
        if self.grouping {
            f.write_str(",")?;
        }
        match self.kind {
            NumberKind::Fixed => write!(f, ".{}f", self.places),
            NumberKind::Integer => f.write_str("d"),
            NumberKind::Percent => write!(f, ".{}%", self.places),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fmt(spec: &str, value: f64) -> String {
        spec.parse::<NumberFormat>().unwrap().format(value).unwrap()
    }

    #[test]
    fn test_gapminder_specs() {
        assert_eq!(fmt(".1f", 70.2), "70.2");
        assert_eq!(fmt(".1f", 28.801), "28.8");
        assert_eq!(fmt(",.0f", 1282697.0), "1,282,697");
        assert_eq!(fmt(",.0f", 8425333.0), "8,425,333");
        assert_eq!(fmt("$,.1f", 779.4453), "$779.4");
        assert_eq!(fmt("$,.1f", 1601.056136), "$1,601.1");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(fmt(".1f", 0.25), "0.3");
        assert_eq!(fmt(".1f", 43.25), "43.3");
        assert_eq!(fmt(",.0f", 2.5), "3");
        assert_eq!(fmt(",.0f", 1282696.5), "1,282,697");
        assert_eq!(fmt(".2f", 0.125), "0.13");
        assert_eq!(fmt(",.0f", 999.5), "1,000");
        assert_eq!(fmt(".1f", 9.95), "9.9");
        assert_eq!(fmt(".1f", 9.75), "9.8");
        assert_eq!(fmt(".1f", -0.25), "-0.3");
        assert_eq!(fmt(".0%", 0.125), "13%");
    }

    #[test]
    fn test_values_near_ties_keep_binary_rounding() {
        // stored just below the tie
        assert_eq!(fmt(".2f", 1.005), "1.00");
        assert_eq!(fmt(".2f", 2.675), "2.67");
        assert_eq!(fmt(".1f", 0.35), "0.3");
        assert_eq!(fmt(".1f", 0.15), "0.1");
        assert_eq!(fmt(".2f", 1.115), "1.11");
        // stored just above the tie
        assert_eq!(fmt(".2f", 30.015), "30.02");
        assert_eq!(fmt(".1f", 0.45), "0.5");
        assert_eq!(fmt(".1f", 0.55), "0.6");
        assert_eq!(fmt(".1f", 30.015), "30.0");
    }

    #[test]
    fn test_constructors_match_specs() {
        assert_eq!(NumberFormat::fixed(1), ".1f".parse().unwrap());
        assert_eq!(NumberFormat::grouped_integer(), ",.0f".parse().unwrap());
        assert_eq!(NumberFormat::currency("$", 1), "$,.1f".parse().unwrap());
        assert_eq!(NumberFormat::percent(0), ".0%".parse().unwrap());
        assert_eq!(NumberFormat::integer(), "d".parse().unwrap());
    }

    #[test]
    fn test_default_precision() {
        assert_eq!(fmt("f", 1.5), "1.500000");
        assert_eq!(fmt(",", 1234.5), "1,234.500000");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(fmt("$,.1f", -1234.56), "-$1,234.6");
        assert_eq!(fmt(".1f", -0.04), "0.0");
        assert_eq!(fmt(",.0f", -999.0), "-999");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt(".1%", 0.1234), "12.3%");
        assert_eq!(fmt(".0%", 1.0), "100%");
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let format = NumberFormat::integer();
        assert_eq!(format.format(1952.0).unwrap(), "1952");
        assert_eq!(format.format(1.5), Err(FormatError::NotInteger(1.5)));
        // precision is ignored for d
        assert_eq!(fmt(",.3d", 1234.0), "1,234");
    }

    #[test]
    fn test_non_finite() {
        let format = NumberFormat::fixed(1);
        assert!(matches!(
            format.format(f64::NAN),
            Err(FormatError::NonFinite(_))
        ));
        assert!(matches!(
            format.format(f64::INFINITY),
            Err(FormatError::NonFinite(_))
        ));
    }

    #[test]
    fn test_percent_overflow_is_non_finite() {
        assert!(matches!(
            NumberFormat::percent(0).format(1e307),
            Err(FormatError::NonFinite(v)) if v.is_infinite()
        ));
        assert!(matches!(
            NumberFormat::percent(1).format(-f64::MAX),
            Err(FormatError::NonFinite(_))
        ));
        assert!(NumberFormat::percent(0).format(1e300).unwrap().ends_with('%'));
    }

    #[test]
    fn test_invalid_specs() {
        for spec in ["", ".f", ".21f", "e", ",.1g", "$$", ".1f%", "1f"] {
            assert!(
                matches!(
                    spec.parse::<NumberFormat>(),
                    Err(FormatError::InvalidSpec { .. })
                ),
                "expected '{}' to be rejected",
                spec
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for spec in ["$,.1f", ",.0f", ".1f", ".2%", "d", ",d"] {
            let format: NumberFormat = spec.parse().unwrap();
            let reparsed: NumberFormat = format.to_string().parse().unwrap();
            assert_eq!(format, reparsed);
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1282697"), "1,282,697");
        assert_eq!(group_thousands("123456"), "123,456");
    }

    proptest! {
        #[test]
        fn grouped_integers_have_runs_of_three(n in 0u64..1_000_000_000_000) {
            let out = NumberFormat::grouped_integer().format(n as f64).unwrap();
            let groups: Vec<&str> = out.split(',').collect();
            prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
            for group in &groups[1..] {
                prop_assert_eq!(group.len(), 3);
            }
            prop_assert_eq!(out.replace(',', ""), n.to_string());
        }

        #[test]
        fn fixed_one_place_rounds_quarters_half_up(m in -4_000_000_000i64..4_000_000_000) {
            // m / 4 is exact in binary; in hundredths it is 25 * m
            let hundredths = 25 * m.unsigned_abs();
            let tenths = (hundredths + 5) / 10;
            let sign = if m < 0 && tenths > 0 { "-" } else { "" };
            let expected = format!("{}{}.{}", sign, tenths / 10, tenths % 10);

            let out = NumberFormat::fixed(1).format(m as f64 / 4.0).unwrap();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn fixed_two_places_stays_within_half_unit(v in -1.0e9f64..1.0e9) {
            let out = NumberFormat::fixed(2).format(v).unwrap();
            let (_, frac) = out.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 2);
            let parsed: f64 = out.parse().unwrap();
            prop_assert!((parsed - v).abs() <= 0.005 + 1e-6, "{} -> {}", v, out);
        }
    }
}
