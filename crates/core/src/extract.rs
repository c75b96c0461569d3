//! Field extraction: turns a decoded JSON object into a [`LogRecord`].
//!
//! Every well-known key is removed from the map exactly once. What is left
//! afterwards becomes [`LogRecord::extras`].

use serde_json::{Map, Value};

use crate::level::Level;
use crate::model::record::{HttpFields, LogRecord};
use crate::time::decode_timestamp;
use crate::value::{is_truthy, parse_int, to_text};

/// Provenance metadata that is removed and never rendered.
const DISCARDED: [&str; 3] = ["pid", "hostname", "v"];

/// Removes every key in `keys` from `map` and returns the value of the first
/// one that was present. A present `null` still wins over later keys.
pub fn extract(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let mut found = None;
    for key in keys {
        let value = map.remove(*key);
        if found.is_none() {
            found = value;
        }
    }
    found
}

/// Normalizes a raw `level` value.
///
/// Known numeric codes and level names map onto their [`Level`]; any other
/// number, string or shape falls back to [`Level::User`].
pub fn normalize_level(value: &Value) -> Level {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(Level::from_code)
            .unwrap_or(Level::User),
        Value::String(s) => s.parse().unwrap_or(Level::User),
        _ => Level::User,
    }
}

/// Splits a raw stack trace into lines.
///
/// Strings are split on line breaks, arrays are taken element by element, and
/// any other shape is converted to text first.
pub fn normalize_trace(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| split_lines(&to_text(item)))
            .collect(),
        other => split_lines(&to_text(other)),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Runs the full extraction pass over a decoded record.
pub fn extract_record(mut fields: Map<String, Value>) -> LogRecord {
    let level = extract(&mut fields, &["level"])
        .filter(is_truthy)
        .map(|v| normalize_level(&v))
        .unwrap_or(Level::User);
    let time = extract(&mut fields, &["time"]).and_then(|v| decode_timestamp(&v));
    let ns = truthy_text(extract(&mut fields, &["ns"])).unwrap_or_default();
    let name = truthy_text(extract(&mut fields, &["name"])).unwrap_or_default();
    let req_id = truthy_text(extract(&mut fields, &["reqId"]));
    let message = extract(&mut fields, &["message", "msg"])
        .filter(|v| !v.is_null())
        .map(|v| to_text(&v));

    for key in DISCARDED {
        fields.remove(key);
    }

    let http = extract_http(&mut fields);

    let mut error = extract(&mut fields, &["err", "error"])
        .filter(is_truthy)
        .map(error_fields);
    let top_trace = extract(&mut fields, &["trace", "stack"]).filter(is_truthy);
    let own_trace = error
        .as_mut()
        .and_then(|err| extract(err, &["trace", "stack"]))
        .filter(is_truthy);
    let trace = own_trace.or(top_trace).map(|v| normalize_trace(&v));

    LogRecord {
        time,
        level,
        ns,
        name,
        req_id,
        message,
        http,
        error,
        trace,
        extras: fields,
    }
}

/// Object forms (`req`, `res`) take precedence over the flat keys; when an
/// object form is present the matching flat keys stay in the residual.
fn extract_http(fields: &mut Map<String, Value>) -> HttpFields {
    let req = extract(fields, &["req"]).filter(is_truthy);
    let res = extract(fields, &["res"]).filter(is_truthy);

    let status = match &res {
        Some(res) => res.get("statusCode").cloned(),
        None => extract(fields, &["statusCode"]),
    };
    let response_time = extract(fields, &["responseTime", "elapsed"]);
    let method = match &req {
        Some(req) => req.get("method").cloned(),
        None => extract(fields, &["method"]),
    };
    let content_length = extract(fields, &["contentLength"]);
    let url = match &req {
        Some(req) => req.get("url").cloned(),
        None => extract(fields, &["url"]),
    };

    HttpFields {
        method: present_text(method),
        url: present_text(url),
        status: status.filter(|v| !v.is_null()).map(|v| {
            if is_truthy(&v) {
                to_text(&v)
            } else {
                String::new()
            }
        }),
        content_length: content_length.as_ref().and_then(parse_int),
        response_time: response_time.as_ref().and_then(parse_int),
    }
}

fn error_fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("message".to_string(), Value::String(to_text(&other)));
            map
        }
    }
}

fn truthy_text(value: Option<Value>) -> Option<String> {
    value.filter(is_truthy).map(|v| to_text(&v))
}

fn present_text(value: Option<Value>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(|v| to_text(&v))
}
