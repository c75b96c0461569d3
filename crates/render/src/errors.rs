//! Error object and stack trace blocks.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use vice_core::value::to_text;

use crate::detail::yaml_lines;
use crate::theme::{ERROR_MARK, STACK_MARK, Theme};

const DEFAULT_ERROR_NAME: &str = "Error";
const ERROR_BODY_INDENT: &str = "   ";

fn error_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^((\w*)(Error|Exception)):").expect("error name pattern is valid")
    })
}

/// Sniffs an error class name such as `TypeError` or `IOException` from the
/// first line of a stack trace. This is a heuristic: traces in other shapes
/// return `None`.
pub fn sniff_error_name(first_line: &str) -> Option<&str> {
    error_name_pattern()
        .captures(first_line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Picks the name shown in the error header: the trace's own error name,
/// else the error object's `name`, else its `type`, else `Error`.
pub fn infer_error_name(trace: Option<&[String]>, err: Option<&Map<String, Value>>) -> String {
    if let Some(name) = trace
        .and_then(|lines| lines.first())
        .and_then(|line| sniff_error_name(line))
    {
        return name.to_string();
    }

    err.and_then(|err| {
        ["name", "type"]
            .iter()
            .filter_map(|key| err.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|name| !name.is_empty() && !name.contains(char::is_whitespace))
    })
    .unwrap_or(DEFAULT_ERROR_NAME)
    .to_string()
}

/// Removes fields that repeat what the header already shows.
fn dedupe(err: &mut Map<String, Value>, name: &str, message: Option<&str>) {
    for key in ["type", "name"] {
        if err.get(key).and_then(Value::as_str) == Some(name) {
            err.remove(key);
        }
    }

    let Some(message) = message else {
        return;
    };
    for key in ["message", "msg"] {
        let repeated = err
            .get(key)
            .filter(|v| !v.is_null())
            .is_some_and(|v| message.contains(to_text(v).as_str()));
        if repeated {
            err.remove(key);
        }
    }
}

/// Renders the error object under a header naming the error class.
///
/// `err` is the record's own copy; `message` is the record's header message
/// used for de-duplication.
pub fn error_block(
    theme: &Theme,
    mut err: Map<String, Value>,
    trace: Option<&[String]>,
    message: Option<&str>,
) -> Vec<String> {
    let name = infer_error_name(trace, Some(&err));
    dedupe(&mut err, &name, message);

    let mut lines = vec![format!("{} {name}:", theme.mark(ERROR_MARK))];
    if !err.is_empty() {
        lines.extend(
            yaml_lines(&Value::Object(err))
                .into_iter()
                .map(|line| format!("{ERROR_BODY_INDENT}{line}")),
        );
    }

    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| theme.indent(line))
        .collect()
}

/// Renders a stack trace. Without an accompanying error block the error
/// header is synthesized from the trace itself.
pub fn trace_block(theme: &Theme, trace: &[String], has_error: bool) -> Vec<String> {
    let sniffed = trace
        .first()
        .is_some_and(|line| sniff_error_name(line).is_some());

    let mut lines = Vec::with_capacity(trace.len() + 2);
    if !has_error {
        let name = infer_error_name(Some(trace), None);
        lines.push(format!("{} {name}:", theme.mark(ERROR_MARK)));
    }
    lines.push(format!("{} Stack trace:", theme.mark(STACK_MARK)));

    let frames = if sniffed { &trace[1..] } else { trace };
    lines.extend(
        frames
            .iter()
            .filter(|line| !line.trim().is_empty())
            .cloned(),
    );

    lines.iter().map(|line| theme.indent(line)).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const PLAIN: Theme = Theme {
        color: false,
        symbols: false,
        gutter_width: 9,
    };

    const SYMBOLS: Theme = Theme {
        color: false,
        symbols: true,
        gutter_width: 9,
    };

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sniffs_error_names() {
        assert_eq!(sniff_error_name("TypeError: bad arg"), Some("TypeError"));
        assert_eq!(sniff_error_name("IOException: disk"), Some("IOException"));
        assert_eq!(sniff_error_name("Error: plain"), Some("Error"));
        assert_eq!(sniff_error_name("  at foo (a.js:1:1)"), None);
        assert_eq!(sniff_error_name("TypeError bad"), None);
    }

    #[test]
    fn name_inference_order() {
        let trace = lines(&["RangeError: too far"]);
        let err = object(json!({"name": "TypeError"}));
        assert_eq!(infer_error_name(Some(&trace), Some(&err)), "RangeError");
        assert_eq!(infer_error_name(None, Some(&err)), "TypeError");
        assert_eq!(
            infer_error_name(None, Some(&object(json!({"type": "DbError"})))),
            "DbError"
        );
        assert_eq!(infer_error_name(None, Some(&Map::new())), "Error");
        assert_eq!(infer_error_name(Some(&lines(&["oops"])), None), "Error");
    }

    #[test]
    fn error_block_drops_repeated_fields() {
        let err = object(json!({"name": "TypeError", "message": "bad arg"}));
        let block = error_block(&PLAIN, err, None, Some("bad arg"));
        assert_eq!(block, vec!["         | TypeError:"]);
    }

    #[test]
    fn error_block_keeps_new_information() {
        let err = object(json!({
            "type": "TypeError",
            "message": "bad arg",
            "code": "E_ARG"
        }));
        let trace = lines(&["TypeError: bad arg", "    at f"]);
        let block = error_block(&SYMBOLS, err, Some(&trace), Some("request failed"));
        assert_eq!(
            block,
            vec![
                "         |🧨 TypeError:",
                "         |   code: E_ARG",
                "         |   message: bad arg",
            ]
        );
    }

    #[test]
    fn trace_block_without_error_synthesizes_header() {
        let trace = lines(&["ReferenceError: x is not defined", "    at a", "", "    at b"]);
        assert_eq!(
            trace_block(&SYMBOLS, &trace, false),
            vec![
                "         |🧨 ReferenceError:",
                "         |💥 Stack trace:",
                "         |    at a",
                "         |    at b",
            ]
        );
    }

    #[test]
    fn trace_block_keeps_unrecognized_first_line() {
        let trace = lines(&["something odd happened", "    at a"]);
        assert_eq!(
            trace_block(&PLAIN, &trace, true),
            vec![
                "         | Stack trace:",
                "         |something odd happened",
                "         |    at a",
            ]
        );
    }
}
