//! Decoded keyword scalar values.

use crate::datatype::DataType;

/// A keyword value decoded from a FITS header card.
///
/// Integers are stored as `i64` whatever their width in the file; the
/// typed accessors narrow on the way out, which is accepted design
/// behavior for this format (header integers are small).
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordValue {
    /// Character string value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Double-precision value.
    Double(f64),
    /// Logical value.
    Logical(bool),
}

impl KeywordValue {
    /// The [`DataType`] this decoded scalar maps back to.
    pub fn data_type(&self) -> DataType {
        match self {
            KeywordValue::String(_) => DataType::Char,
            KeywordValue::Int(_) => DataType::Int,
            KeywordValue::Double(_) => DataType::Double,
            KeywordValue::Logical(_) => DataType::Logical,
        }
    }

    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeywordValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content as an integer, narrowing a stored double.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            KeywordValue::Int(n) => Some(*n),
            KeywordValue::Double(d) => Some(*d as i64),
            _ => None,
        }
    }

    /// Numeric content as a double, widening a stored integer.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            KeywordValue::Int(n) => Some(*n as f64),
            KeywordValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The logical content, if this is a logical value.
    pub fn as_logical(&self) -> Option<bool> {
        match self {
            KeywordValue::Logical(b) => Some(*b),
            _ => None,
        }
    }
}

impl core::fmt::Display for KeywordValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KeywordValue::String(s) => f.write_str(s),
            KeywordValue::Int(n) => write!(f, "{n}"),
            KeywordValue::Double(d) => write!(f, "{d}"),
            KeywordValue::Logical(b) => write!(f, "{}", if *b { 'T' } else { 'F' }),
        }
    }
}

impl From<&str> for KeywordValue {
    fn from(s: &str) -> Self {
        KeywordValue::String(s.into())
    }
}

impl From<String> for KeywordValue {
    fn from(s: String) -> Self {
        KeywordValue::String(s)
    }
}

impl From<i64> for KeywordValue {
    fn from(n: i64) -> Self {
        KeywordValue::Int(n)
    }
}

impl From<i32> for KeywordValue {
    fn from(n: i32) -> Self {
        KeywordValue::Int(n as i64)
    }
}

impl From<i16> for KeywordValue {
    fn from(n: i16) -> Self {
        KeywordValue::Int(n as i64)
    }
}

impl From<f64> for KeywordValue {
    fn from(d: f64) -> Self {
        KeywordValue::Double(d)
    }
}

impl From<bool> for KeywordValue {
    fn from(b: bool) -> Self {
        KeywordValue::Logical(b)
    }
}
