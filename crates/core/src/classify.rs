use std::fmt;

use serde_json::{Map, Value};

use crate::extract::extract_record;
use crate::model::record::LogRecord;
use crate::value::is_truthy;

/// Outcome of looking at one input.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Structured(Box<LogRecord>),
    Unhandled(Unhandled),
}

/// Why an input is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unhandled {
    NotJson,
    NotObject,
    MissingLevel,
    MissingVersion,
}

impl fmt::Display for Unhandled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NotJson => "not valid json",
            Self::NotObject => "json is not an object",
            Self::MissingLevel => "no level field",
            Self::MissingVersion => "decoded record has no version marker",
        };
        f.write_str(reason)
    }
}

/// Classifies a raw text line.
pub fn classify_line(line: &str) -> Classified {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(fields)) => classify_fields(fields),
        Ok(_) => Classified::Unhandled(Unhandled::NotObject),
        Err(_) => Classified::Unhandled(Unhandled::NotJson),
    }
}

/// Classifies an already-decoded record. Such records must carry a truthy
/// `v` marker in addition to a level.
pub fn classify_value(value: Value) -> Classified {
    match value {
        Value::Object(fields) => {
            if !fields.get("v").is_some_and(is_truthy) {
                return Classified::Unhandled(Unhandled::MissingVersion);
            }
            classify_fields(fields)
        }
        _ => Classified::Unhandled(Unhandled::NotObject),
    }
}

fn classify_fields(fields: Map<String, Value>) -> Classified {
    if !fields.get("level").is_some_and(is_truthy) {
        return Classified::Unhandled(Unhandled::MissingLevel);
    }
    Classified::Structured(Box::new(extract_record(fields)))
}
