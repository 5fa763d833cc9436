use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decoded cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check whether the value counts as "nothing there" for key fallback.
    ///
    /// Null, `false`, zero, NaN and the empty string are all falsy. Whitespace
    /// is not trimmed, so `" "` is truthy.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Bool(b) => !b,
            CellValue::Int(i) => *i == 0,
            CellValue::Float(f) => *f == 0.0 || f.is_nan(),
            CellValue::String(s) => s.is_empty(),
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write_number(f, *fl),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

/// Write a number the way it reads in a text template.
///
/// Whole values drop the trailing ".0" (a date serial such as 32874 stays
/// "32874"). Magnitudes from 1e21 up, or below 1e-6, switch to exponent form
/// with an explicit sign, e.g. "1e+21" and "1e-7".
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }
    if n == 0.0 {
        return write!(f, "0");
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => write!(f, "{exp}"),
        };
    }
    write!(f, "{n}")
}
