//! Parameter assignment parsing and merging utilities.

use crate::params::{ParamMap, ParamValue};

/// Parse a `key=value` assignment from the command line.
///
/// The value is read as YAML, so `true` becomes a bool, `24` an integer,
/// `0.5` a float, `[[0, 4096]]` a range list and anything else a string.
/// An empty value is the empty string.
pub fn parse_param_assignment(assignment: &str) -> Result<(String, ParamValue), String> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| format!("Expected key=value, got '{}'", assignment))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing parameter name in '{}'", assignment));
    }

    let raw = raw.trim();
    let value = if raw.is_empty() {
        ParamValue::Str(String::new())
    } else {
        serde_yaml::from_str::<ParamValue>(raw).unwrap_or_else(|_| ParamValue::Str(raw.to_string()))
    };
    Ok((key.to_string(), value))
}

/// Merge two parameter maps, with overrides taking precedence over defaults
pub fn merge_params(defaults: &ParamMap, overrides: &[(String, ParamValue)]) -> ParamMap {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignments() {
        assert_eq!(parse_param_assignment("coherent=true").unwrap(), ("coherent".to_string(), ParamValue::Bool(true)));
        assert_eq!(parse_param_assignment("q_capacity=8").unwrap().1, ParamValue::Int(8));
        assert_eq!(parse_param_assignment("wr_ratio=0.25").unwrap().1, ParamValue::Float(0.25));
        assert_eq!(parse_param_assignment("interleave_type=hotcold").unwrap().1, ParamValue::from("hotcold"));
        assert_eq!(parse_param_assignment("ranges=[[0, 64]]").unwrap().1, ParamValue::Ranges(vec![[0, 64]]));
        assert_eq!(parse_param_assignment("trace_file=").unwrap().1, ParamValue::from(""));
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_param_assignment("q_capacity").is_err());
        assert!(parse_param_assignment("=5").is_err());
    }

    #[test]
    fn test_merge_params() {
        let mut defaults = ParamMap::new();
        defaults.insert("q_capacity".to_string(), ParamValue::Int(24));
        defaults.insert("interleave_param".to_string(), ParamValue::Int(10000));

        let merged = merge_params(&defaults, &[("q_capacity".to_string(), ParamValue::Int(8))]);
        assert_eq!(merged["q_capacity"], ParamValue::Int(8));
        assert_eq!(merged["interleave_param"], ParamValue::Int(10000));
    }
}
