use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

/// 2023-11-14T22:13:20Z
pub const SAMPLE_TIME_MS: i64 = 1_700_000_000_000;

pub fn sample_local_clock() -> String {
    Utc.timestamp_millis_opt(SAMPLE_TIME_MS)
        .unwrap()
        .with_timezone(&chrono::Local)
        .format("%H:%M:%S")
        .to_string()
}

pub fn incoming_request() -> Value {
    json!({
        "level": 30,
        "time": SAMPLE_TIME_MS,
        "msg": "incoming request",
        "pid": 4242,
        "hostname": "api-7f9c",
        "v": 1,
        "reqId": "req-1",
        "req": {"method": "GET", "url": "/health"}
    })
}

pub fn request_completed() -> Value {
    json!({
        "level": 30,
        "time": SAMPLE_TIME_MS,
        "msg": "request completed",
        "reqId": "req-1",
        "res": {"statusCode": 200},
        "responseTime": 1200,
        "contentLength": 1500
    })
}

pub fn warn_with_context() -> Value {
    json!({
        "level": 40,
        "time": SAMPLE_TIME_MS,
        "ns": "billing",
        "name": "invoices",
        "msg": "retrying charge",
        "attempt": 2,
        "customer": {"id": "c_1", "plan": "pro"}
    })
}

pub fn error_with_stack() -> Value {
    json!({
        "level": 50,
        "time": SAMPLE_TIME_MS,
        "name": "worker",
        "msg": "bad arg",
        "err": {
            "type": "TypeError",
            "message": "bad arg",
            "code": "E_ARG",
            "stack": "TypeError: bad arg\n    at parse (parser.js:10:5)\n    at run (worker.js:3:1)"
        }
    })
}

pub fn trace_only() -> Value {
    json!({
        "level": "fatal",
        "msg": "process crashed",
        "stack": [
            "RangeError: Maximum call stack size exceeded",
            "    at recurse (loop.js:1:1)"
        ]
    })
}

/// Serializes a fixture as a single input line.
pub fn line(record: &Value) -> String {
    record.to_string()
}

/// Returns `record` with `key` replaced or inserted.
pub fn with(mut record: Value, key: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut record {
        map.insert(key.to_string(), value);
    }
    record
}

/// Returns `record` with `key` removed.
pub fn without(mut record: Value, key: &str) -> Value {
    if let Value::Object(map) = &mut record {
        map.remove(key);
    }
    record
}
