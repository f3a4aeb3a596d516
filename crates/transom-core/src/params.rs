//! Injected-parameter values.
//!
//! Overridable constants are a structured configuration surface: each value
//! carries its type, and rendering into source text happens in exactly one
//! place ([`ParamValue`]'s `Display` impl).

use std::collections::BTreeMap;
use std::fmt;

/// Mapping from configuration key to overriding value.
///
/// A `BTreeMap` so iteration order is canonical; fingerprints computed over
/// the map do not depend on insertion order.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A value injected into a tagged module constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Verbatim source text, spliced without quoting.
    Raw(String),
}

impl fmt::Display for ParamValue {
    /// Render the value as a source literal in the module language's
    /// conventions (`True`/`False` booleans, single-quoted strings).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Str(v) => write!(f, "'{}'", v.replace('\\', "\\\\").replace('\'', "\\'")),
            Self::Raw(v) => f.write_str(v),
        }
    }
}

impl std::hash::Hash for ParamValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Variant discriminants keep e.g. Str("20") and Raw("20") distinct:
        // they render to different source text.
        match self {
            Self::Int(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Self::Float(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Self::Bool(v) => {
                2u8.hash(state);
                v.hash(state);
            }
            Self::Str(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Self::Raw(v) => {
                4u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_numbers() {
        assert_eq!(ParamValue::Int(20).to_string(), "20");
        assert_eq!(ParamValue::Int(-3).to_string(), "-3");
        assert_eq!(ParamValue::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_renders_booleans_in_module_convention() {
        assert_eq!(ParamValue::Bool(true).to_string(), "True");
        assert_eq!(ParamValue::Bool(false).to_string(), "False");
    }

    #[test]
    fn test_renders_quoted_strings() {
        assert_eq!(ParamValue::from("radius").to_string(), "'radius'");
        assert_eq!(
            ParamValue::from("it's a \\ path").to_string(),
            "'it\\'s a \\\\ path'"
        );
    }

    #[test]
    fn test_raw_is_verbatim() {
        assert_eq!(
            ParamValue::Raw("{'a': 1}".to_string()).to_string(),
            "{'a': 1}"
        );
    }
}
