//! Residual field rendering.
//!
//! Fields that did not become header tokens are shown either as a short
//! inline `key: value` summary or, when that summary gets too long, as an
//! indented YAML block below the header.

use serde_json::{Map, Value};
use tracing::trace;

use crate::theme::{Theme, Tone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    None,
    Inline(String),
    Block(Vec<String>),
}

pub fn render(theme: &Theme, extras: &Map<String, Value>, threshold: usize) -> Detail {
    let summary = summarize(extras);
    if summary.is_empty() {
        return Detail::None;
    }

    let width = summary.chars().count();
    if width < threshold {
        trace!(width, "residual rendered inline");
        return Detail::Inline(theme.paint(Tone::Muted, &summary));
    }

    trace!(width, threshold, "residual rendered as block");
    let lines = yaml_lines(&Value::Object(extras.clone()))
        .iter()
        .map(|line| theme.indent(&theme.paint(Tone::Muted, line)))
        .collect();
    Detail::Block(lines)
}

/// Flattens nested objects and arrays into `a.b.0: value` pairs joined by `, `.
pub fn summarize(extras: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    for (key, value) in extras {
        flatten(key, value, &mut pairs);
    }
    pairs
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn flatten(path: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten(&format!("{path}.{key}"), child, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                flatten(&format!("{path}.{i}"), child, out);
            }
        }
        Value::Object(_) => out.push((path.to_string(), "{}".to_string())),
        Value::Array(_) => out.push((path.to_string(), "[]".to_string())),
        Value::String(s) => out.push((path.to_string(), s.clone())),
        other => out.push((path.to_string(), other.to_string())),
    }
}

/// Dumps a value as YAML, one entry per line, blank lines removed.
pub fn yaml_lines(value: &Value) -> Vec<String> {
    let dumped = serde_yaml::to_string(value)
        .or_else(|_| serde_json::to_string_pretty(value))
        .unwrap_or_else(|_| value.to_string());
    dumped
        .lines()
        .filter(|line| !line.trim().is_empty() && *line != "---")
        .map(str::to_string)
        .collect()
}
