//! Typed parameters and their rendering for tool command lines.
//!
//! Parameters reach a backend as [`ParameterMap`]s, one per [`ParamType`].
//! Maps keep declaration order so generated scripts list values in the same
//! order as the project description.

use crate::errors::{EdaError, EdaResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping from parameter name to typed value.
pub type ParameterMap = IndexMap<String, ParamValue>;

/// How a parameter is delivered to the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Argument to a tool's own command line
    Cmdlinearg,
    /// VHDL generic
    Generic,
    /// Runtime `+name=value` argument read by the testbench
    Plusarg,
    /// Verilog preprocessor define
    Vlogdefine,
    /// Verilog toplevel parameter
    Vlogparam,
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::Cmdlinearg => write!(f, "cmdlinearg"),
            ParamType::Generic => write!(f, "generic"),
            ParamType::Plusarg => write!(f, "plusarg"),
            ParamType::Vlogdefine => write!(f, "vlogdefine"),
            ParamType::Vlogparam => write!(f, "vlogparam"),
        }
    }
}

/// Declared datatype of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Bool,
    File,
    Int,
    Real,
    Str,
}

/// Strongly-typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl ParamValue {
    /// Render the value for a tool command line.
    ///
    /// Booleans become `1`/`0`, or `true`/`false` when `bool_is_str` is set
    /// (VHDL generics). Reals always carry a fraction or an exponent (`2.0`,
    /// `1e20`). Strings are wrapped in `quote`, which is usually empty.
    pub fn render(&self, quote: &str, bool_is_str: bool) -> String {
        match self {
            ParamValue::Bool(b) if bool_is_str => b.to_string(),
            ParamValue::Bool(true) => "1".to_string(),
            ParamValue::Bool(false) => "0".to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Real(r) => format!("{r:?}"),
            ParamValue::Str(s) => format!("{quote}{s}{quote}"),
        }
    }

    /// Convert a JSON value into a parameter of the given datatype.
    pub fn from_json(name: &str, datatype: DataType, value: &Value) -> EdaResult<Self> {
        match (datatype, value) {
            (DataType::Bool, Value::Bool(b)) => Ok(ParamValue::Bool(*b)),
            (DataType::Bool, Value::String(s)) => Self::parse(name, datatype, s),
            (DataType::Int, Value::Number(n)) => n
                .as_i64()
                .map(ParamValue::Int)
                .ok_or_else(|| EdaError::invalid_parameter(name, format!("{n} is not an integer"))),
            (DataType::Int, Value::String(s)) => Self::parse(name, datatype, s),
            (DataType::Real, Value::Number(n)) => n
                .as_f64()
                .map(ParamValue::Real)
                .ok_or_else(|| EdaError::invalid_parameter(name, format!("{n} is not a number"))),
            (DataType::Real, Value::String(s)) => Self::parse(name, datatype, s),
            (DataType::Str | DataType::File, Value::String(s)) => Ok(ParamValue::Str(s.clone())),
            (DataType::Str | DataType::File, Value::Number(n)) => Ok(ParamValue::Str(n.to_string())),
            (DataType::Str | DataType::File, Value::Bool(b)) => Ok(ParamValue::Str(b.to_string())),
            (datatype, other) => Err(EdaError::invalid_parameter(
                name,
                format!("expected {datatype:?} value, got {other}"),
            )),
        }
    }

    /// Parse a textual value (for example from a command line) as the given datatype.
    pub fn parse(name: &str, datatype: DataType, text: &str) -> EdaResult<Self> {
        match datatype {
            DataType::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(EdaError::invalid_parameter(
                    name,
                    format!("'{text}' is not a boolean"),
                )),
            },
            DataType::Int => text.trim().parse::<i64>().map(ParamValue::Int).map_err(|e| {
                EdaError::invalid_parameter(name, format!("'{text}' is not an integer: {e}"))
            }),
            DataType::Real => text.trim().parse::<f64>().map(ParamValue::Real).map_err(|e| {
                EdaError::invalid_parameter(name, format!("'{text}' is not a number: {e}"))
            }),
            DataType::Str | DataType::File => Ok(ParamValue::Str(text.to_string())),
        }
    }
}

/// Render each entry of `params` as `key=value`.
pub fn render_assignments(params: &ParameterMap, bool_is_str: bool) -> Vec<String> {
    params
        .iter()
        .map(|(key, value)| format!("{key}={}", value.render("", bool_is_str)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_bool() {
        assert_eq!(ParamValue::Bool(true).render("", false), "1");
        assert_eq!(ParamValue::Bool(false).render("", false), "0");
        assert_eq!(ParamValue::Bool(true).render("", true), "true");
        assert_eq!(ParamValue::Bool(false).render("", true), "false");
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(ParamValue::Int(-8).render("", false), "-8");
        assert_eq!(ParamValue::Real(2.0).render("", false), "2.0");
        assert_eq!(ParamValue::Real(0.25).render("", false), "0.25");
        assert_eq!(ParamValue::Real(1e20).render("", false), "1e20");
    }

    #[test]
    fn test_render_string_with_quote() {
        let value = ParamValue::from("hello");
        assert_eq!(value.render("", false), "hello");
        assert_eq!(value.render("\"", false), "\"hello\"");
    }

    #[test]
    fn test_from_json_by_datatype() {
        assert_eq!(
            ParamValue::from_json("w", DataType::Int, &json!(8)).unwrap(),
            ParamValue::Int(8)
        );
        assert_eq!(
            ParamValue::from_json("w", DataType::Int, &json!("16")).unwrap(),
            ParamValue::Int(16)
        );
        assert_eq!(
            ParamValue::from_json("b", DataType::Bool, &json!("true")).unwrap(),
            ParamValue::Bool(true)
        );
        assert_eq!(
            ParamValue::from_json("f", DataType::File, &json!("mem.hex")).unwrap(),
            ParamValue::from("mem.hex")
        );
    }

    #[test]
    fn test_from_json_rejects_mismatch() {
        let err = ParamValue::from_json("w", DataType::Int, &json!(1.5)).unwrap_err();
        assert!(matches!(err, EdaError::InvalidParameter { ref name, .. } if name == "w"));

        let err = ParamValue::from_json("b", DataType::Bool, &json!([1])).unwrap_err();
        assert!(matches!(err, EdaError::InvalidParameter { .. }));
    }

    #[test]
    fn test_render_assignments_keeps_order() {
        let mut params = ParameterMap::new();
        params.insert("WIDTH".to_string(), ParamValue::Int(8));
        params.insert("ENABLE".to_string(), ParamValue::Bool(true));
        params.insert("NAME".to_string(), ParamValue::from("core"));

        assert_eq!(
            render_assignments(&params, false),
            vec!["WIDTH=8", "ENABLE=1", "NAME=core"]
        );
        assert_eq!(render_assignments(&params, true)[1], "ENABLE=true");
    }
}
