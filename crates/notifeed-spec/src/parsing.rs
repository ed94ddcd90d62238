//! Spec file parsing.
//!
//! Parsing runs in two passes so that failures can be told apart: the text is
//! first read as an untyped YAML value (syntax errors), then checked for shape
//! and field names, and only then mapped onto [`RawSpec`].

use std::path::Path;

use serde_yaml::Value;

use crate::error::{SpecError, SpecErrorKind};
use crate::raw::RawSpec;

/// Parse the contents of a spec file.
pub fn parse_spec(content: &str) -> Result<RawSpec, SpecErrorKind> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| SpecErrorKind::Syntax {
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })?;

    let mapping = match &value {
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(SpecErrorKind::NotAMapping {
                found: describe(other),
            })
        }
    };

    for key in mapping.keys() {
        let known = key.as_str().map_or(false, |k| RawSpec::FIELDS.contains(&k));
        if !known {
            return Err(SpecErrorKind::UnknownField {
                field: render_key(key),
            });
        }
    }

    serde_yaml::from_value(value).map_err(|e| SpecErrorKind::InvalidValue {
        message: e.to_string(),
    })
}

/// Read and parse a spec file, capping its size at `max_size` bytes.
pub fn load_spec(path: &Path, max_size: u64) -> Result<RawSpec, SpecError> {
    // The handle is closed inside read_to_string, before any parsing.
    let content = notifeed_common_fs::read_to_string(path, max_size)
        .map_err(|e| SpecError::new(path, e.into()))?;
    parse_spec(&content).map_err(|kind| SpecError::new(path, kind))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn render_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
