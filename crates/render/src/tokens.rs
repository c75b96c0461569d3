//! Header tokens. Each function styles one extracted field.

use chrono::{DateTime, Local, Utc};
use vice_core::Level;

use crate::NEWLINE;
use crate::humanize::{byte_size, duration_ms};
use crate::theme::{Theme, Tone, level_style};

const STATUS_PLACEHOLDER: &str = "xxx";

pub fn date(theme: &Theme, ts: DateTime<Utc>) -> String {
    let local = ts.with_timezone(&Local).format("%H:%M:%S").to_string();
    theme.paint(Tone::Muted, &local)
}

pub fn level(theme: &Theme, level: Level) -> String {
    let style = level_style(level);
    if !theme.symbols {
        return theme.paint(style.tone, level.as_str());
    }
    if style.narrow {
        format!("{} ", style.glyph)
    } else {
        style.glyph.to_string()
    }
}

pub fn namespace(theme: &Theme, ns: &str) -> String {
    theme.paint(Tone::Namespace, ns)
}

pub fn name(theme: &Theme, name: &str) -> String {
    theme.paint(Tone::Name, name)
}

pub fn request_id(theme: &Theme, id: &str) -> String {
    theme.paint(Tone::RequestId, &format!("[{id}]"))
}

/// Rewrites the request/response lifecycle messages into arrows.
pub fn alias_message(message: &str) -> &str {
    match message {
        "request" | "incoming request" => "<--",
        "response" | "request completed" => "-->",
        other => other,
    }
}

/// Colors the message by severity. Continuation lines are moved under the
/// gutter so they line up below the header.
pub fn message(theme: &Theme, message: &str, level: Level) -> String {
    let tone = level_style(level).tone;
    let text = alias_message(message);
    let mut lines = text.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };

    let mut rendered = theme.paint(tone, first);
    for line in lines {
        rendered.push_str(NEWLINE);
        rendered.push_str(&theme.indent(&format!(" {}", theme.paint(tone, line))));
    }
    rendered
}

pub fn method(theme: &Theme, method: &str) -> String {
    theme.paint(Tone::Plain, method)
}

pub fn url(theme: &Theme, url: &str) -> String {
    theme.paint(Tone::Plain, url)
}

pub fn status(theme: &Theme, status: &str) -> String {
    let status = if status.is_empty() {
        STATUS_PLACEHOLDER
    } else {
        status
    };
    theme.paint(Tone::Plain, status)
}

pub fn duration(theme: &Theme, ms: i64) -> String {
    theme.paint(Tone::Muted, &duration_ms(ms))
}

pub fn size(theme: &Theme, bytes: i64) -> String {
    theme.paint(Tone::Muted, &byte_size(bytes))
}
