//! Parameter value type and its rendering rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Override bag applied on top of a device's defaults, in key order
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A single device parameter value.
///
/// Rendering follows the simulator's config grammar:
/// - `Bool(true)` -> `true`
/// - `Str(s)` -> `"s"` (no escaping)
/// - `Int(n)` -> `n`
/// - `Float(x)` -> `x`, with a trailing `.0` for integral values
/// - `Ranges(r)` -> `[[a, b], [c, d]]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Ranges(Vec<[u64; 2]>),
}

impl ParamValue {
    /// Short type name, used in mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Ranges(_) => "range list",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers widen to floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_ranges(&self) -> Option<&[[u64; 2]]> {
        match self {
            Self::Ranges(r) => Some(r),
            _ => None,
        }
    }
}

/// Format a float the way the simulator config expects, matching Python's
/// `repr`: shortest round-trip digits, integral values keep `.0`, and
/// exponent notation (`1e-05`, `1.5e+16`) outside `1e-4 <= |x| < 1e16`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e16" or "-1e-5"
    let scientific = format!("{:e}", x);
    let parsed = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| exp.parse::<i32>().ok().map(|exp| (mantissa, exp)));

    match parsed {
        Some((mantissa, exp)) if !(-4..16).contains(&exp) => {
            format!("{}e{}{:02}", mantissa, if exp < 0 { '-' } else { '+' }, exp.abs())
        }
        _ => {
            let plain = x.to_string();
            if plain.contains('.') {
                plain
            } else {
                format!("{}.0", plain)
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Ranges(ranges) => {
                f.write_str("[")?;
                for (i, [start, end]) in ranges.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "[{}, {}]", start, end)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<[u64; 2]>> for ParamValue {
    fn from(value: Vec<[u64; 2]>) -> Self {
        Self::Ranges(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
        assert_eq!(ParamValue::Bool(false).to_string(), "false");
        assert_eq!(ParamValue::Int(1 << 30).to_string(), "1073741824");
        assert_eq!(ParamValue::Int(-3).to_string(), "-3");
        assert_eq!(ParamValue::from("stream").to_string(), "\"stream\"");
        assert_eq!(ParamValue::from("").to_string(), "\"\"");
    }

    #[test]
    fn test_float_rendering() {
        assert_eq!(ParamValue::Float(0.5).to_string(), "0.5");
        assert_eq!(ParamValue::Float(0.0).to_string(), "0.0");
        assert_eq!(ParamValue::Float(3.0).to_string(), "3.0");
        assert_eq!(ParamValue::Float(0.9).to_string(), "0.9");
    }

    #[test]
    fn test_float_exponent_forms() {
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e16), "1.5e+16");
        assert_eq!(format_float(1e100), "1e+100");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }

    #[test]
    fn test_range_rendering() {
        assert_eq!(ParamValue::Ranges(vec![[0, 1 << 30]]).to_string(), "[[0, 1073741824]]");
        assert_eq!(ParamValue::Ranges(vec![[0, 16], [32, 64]]).to_string(), "[[0, 16], [32, 64]]");
        assert_eq!(ParamValue::Ranges(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_yaml_untagged_values() {
        let map: ParamMap = serde_yaml::from_str(
            "coherent: true\nq_capacity: 24\nwr_ratio: 0.25\ninterleave_type: trace\nranges: [[0, 4096]]\n",
        )
        .unwrap();

        assert_eq!(map["coherent"], ParamValue::Bool(true));
        assert_eq!(map["q_capacity"], ParamValue::Int(24));
        assert_eq!(map["wr_ratio"], ParamValue::Float(0.25));
        assert_eq!(map["interleave_type"], ParamValue::from("trace"));
        assert_eq!(map["ranges"], ParamValue::Ranges(vec![[0, 4096]]));
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(ParamValue::Int(4).as_float(), Some(4.0));
        assert_eq!(ParamValue::Float(4.5).as_int(), None);
        assert_eq!(ParamValue::from("x").as_bool(), None);
    }
}
