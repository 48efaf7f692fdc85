//! Output rendering — turns extracted variables into text.
//!
//! Supported modes:
//! - key-value (default): `key: "value"`, one per line
//! - env: `export KEY="value"`, ready for `eval`
//! - debug: ansible's raw output, untouched

use std::fmt::Write;

use serde_json::Value;

use crate::extract::VariableMap;

/// How the extracted variables are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    KeyValue,
    Env,
    Debug,
}

impl OutputMode {
    /// Pick the mode from the CLI flags. `--debug` beats `--env`.
    pub fn from_flags(debug: bool, env: bool) -> Self {
        if debug {
            Self::Debug
        } else if env {
            Self::Env
        } else {
            Self::KeyValue
        }
    }
}

/// Format variables as `key: value` lines.
pub fn render_key_value(variables: &VariableMap) -> String {
    let mut out = String::new();
    for (key, value) in variables {
        match value {
            Value::String(s) => {
                let _ = writeln!(out, "{key}: \"{}\"", s.trim());
            }
            other => {
                let _ = writeln!(out, "{key}: {other}");
            }
        }
    }
    out
}

/// Format variables as shell `export` statements.
pub fn render_env(variables: &VariableMap) -> String {
    let mut out = String::new();
    for (key, value) in variables {
        let name = env_key(key);
        match value {
            Value::String(s) => {
                let _ = writeln!(out, "export {name}=\"{}\"", s.trim());
            }
            other => {
                let _ = writeln!(out, "export {name}={other}");
            }
        }
    }
    out
}

/// Upper-case a variable name and replace `-` and `.` with `_`.
pub fn env_key(key: &str) -> String {
    key.to_uppercase().replace(['-', '.'], "_")
}
