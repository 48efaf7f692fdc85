//! Variable extraction — pulls the hostvars JSON out of ansible's debug
//! output and drops ansible's own bookkeeping variables.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{ExtractError, Result};

/// Ordered variable name → value mapping, as ansible reported it.
pub type VariableMap = Map<String, Value>;

/// Key under which the debug module reports the requested variable.
pub const HOSTVARS_KEY: &str = "hostvars[inventory_hostname]";

/// Variables starting with this prefix belong to ansible.
pub const RESERVED_PREFIX: &str = "ansible_";

/// Exact variable names ansible injects into every host.
pub const RESERVED_NAMES: &[&str] = &[
    "group_names",
    "groups",
    "inventory_dir",
    "inventory_file",
    "inventory_hostname",
    "inventory_hostname_short",
    "omit",
    "playbook_dir",
];

/// From the host success marker to the last closing brace in the text.
fn success_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)localhost.*SUCCESS.*?(\{.*\})").expect("hostvars pattern is valid")
    })
}

/// Extract the user-defined variables from raw ansible output.
pub fn extract_variables(output: &str) -> Result<VariableMap> {
    let json = success_pattern()
        .captures(output)
        .and_then(|caps| caps.get(1))
        .ok_or(ExtractError::NoValidOutput)?
        .as_str();

    let data: Value = serde_json::from_str(json)?;

    let variables = match data.get(HOSTVARS_KEY) {
        None => VariableMap::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(ExtractError::UnexpectedStructure(format!(
                "'{HOSTVARS_KEY}' is {}, expected an object",
                type_name(other)
            )));
        }
    };

    let filtered = filter_reserved(&variables);
    tracing::debug!(
        total = variables.len(),
        kept = filtered.len(),
        "extracted host variables"
    );
    Ok(filtered)
}

/// Whether a variable name belongs to ansible rather than the user.
pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX) || RESERVED_NAMES.contains(&key)
}

/// Copy of `variables` without any reserved key, order preserved.
pub fn filter_reserved(variables: &VariableMap) -> VariableMap {
    variables
        .iter()
        .filter(|(key, _)| !is_reserved(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> VariableMap {
        match value {
            Value::Object(m) => m,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn extracts_and_filters_single_line_output() {
        let output = r#"localhost | SUCCESS => {"hostvars[inventory_hostname]": {"foo": "bar", "ansible_x": 1}}"#;
        let vars = extract_variables(output).unwrap();
        assert_eq!(vars, map(json!({"foo": "bar"})));
    }

    #[test]
    fn extracts_multiline_pretty_output() {
        let output = "\
[WARNING]: No inventory was parsed
localhost | SUCCESS => {
    \"hostvars[inventory_hostname]\": {
        \"ansible_check_mode\": false,
        \"db_password\": \"s3cret\\n\",
        \"group_names\": [],
        \"port\": 5432,
        \"playbook_dir\": \"/tmp\"
    }
}
";
        let vars = extract_variables(output).unwrap();
        assert_eq!(vars, map(json!({"db_password": "s3cret\n", "port": 5432})));
    }

    #[test]
    fn preserves_ansible_key_order() {
        let output = r#"localhost | SUCCESS => {"hostvars[inventory_hostname]": {"zeta": 1, "alpha": 2, "mid": 3}}"#;
        let vars = extract_variables(output).unwrap();
        let keys: Vec<&str> = vars.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_success_marker_is_content_error() {
        let output = r#"localhost | FAILED! => {"msg": "Decryption failed"}"#;
        let err = extract_variables(output).unwrap_err();
        assert!(matches!(err, ExtractError::NoValidOutput));
        assert!(err.is_content_error());
    }

    #[test]
    fn empty_output_is_content_error() {
        assert!(matches!(
            extract_variables("").unwrap_err(),
            ExtractError::NoValidOutput
        ));
    }

    #[test]
    fn malformed_json_is_content_error() {
        let output = r#"localhost | SUCCESS => {"hostvars[inventory_hostname]": {"foo": }"#;
        let err = extract_variables(output).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJson(_)));
        assert!(err.is_content_error());
    }

    #[test]
    fn absent_hostvars_key_yields_empty_map() {
        let output = r#"localhost | SUCCESS => {"changed": false}"#;
        assert!(extract_variables(output).unwrap().is_empty());
    }

    #[test]
    fn non_object_hostvars_is_content_error() {
        let output = r#"localhost | SUCCESS => {"hostvars[inventory_hostname]": "VARIABLE IS NOT DEFINED!"}"#;
        let err = extract_variables(output).unwrap_err();
        assert!(matches!(err, ExtractError::UnexpectedStructure(_)));
    }

    #[test]
    fn greedy_span_runs_to_last_closing_brace() {
        let output = "localhost | SUCCESS => {\"hostvars[inventory_hostname]\": {}}\nPLAY RECAP {ok=1}";
        assert!(matches!(
            extract_variables(output).unwrap_err(),
            ExtractError::InvalidJson(_)
        ));
    }

    #[test]
    fn last_success_marker_wins() {
        let output = "localhost | SUCCESS => {\"hostvars[inventory_hostname]\": {\"a\": 1}}\n\
                      other | SUCCESS => {\"hostvars[inventory_hostname]\": {\"b\": 2}}";
        assert_eq!(extract_variables(output).unwrap(), map(json!({"b": 2})));
    }

    #[test]
    fn reserved_names_and_prefix_are_recognised() {
        for name in RESERVED_NAMES {
            assert!(is_reserved(name), "{name} should be reserved");
        }
        assert!(is_reserved("ansible_facts"));
        assert!(is_reserved("ansible_"));
        assert!(!is_reserved("my_ansible_var"));
        assert!(!is_reserved("groups_extra"));
        assert!(!is_reserved("Omit"));
    }

    #[test]
    fn filter_is_idempotent() {
        let vars = map(json!({
            "ansible_host": "x",
            "api_key": "k",
            "groups": {},
            "omit": "__omit_place_holder__",
            "region": "eu-west-1"
        }));
        let once = filter_reserved(&vars);
        let twice = filter_reserved(&once);
        assert_eq!(once, twice);
        assert_eq!(once, map(json!({"api_key": "k", "region": "eu-west-1"})));
    }

    #[test]
    fn filter_is_order_independent() {
        let a = map(json!({"ansible_x": 1, "b": 2, "inventory_file": "f", "c": 3}));
        let mut reversed = VariableMap::new();
        for (k, v) in a.iter().rev() {
            reversed.insert(k.clone(), v.clone());
        }

        let fa = filter_reserved(&a);
        let fb = filter_reserved(&reversed);
        assert_eq!(fa.len(), fb.len());
        for (k, v) in &fa {
            assert_eq!(fb.get(k), Some(v));
        }
        assert!(fa.keys().all(|k| !is_reserved(k)));
    }
}
