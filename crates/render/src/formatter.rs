use serde_json::Value;
use tracing::debug;
use vice_core::classify::{Classified, classify_line, classify_value};
use vice_core::config::Config;
use vice_core::{Level, LogRecord};

use crate::NEWLINE;
use crate::detail::{self, Detail};
use crate::errors::{error_block, trace_block};
use crate::theme::Theme;
use crate::tokens;

/// Resolved rendering switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub symbols: bool,
    pub detail_threshold: usize,
    pub quiet_levels: Vec<Level>,
    pub gutter_width: usize,
}

impl RenderOptions {
    /// No color, no symbols, default layout.
    pub fn plain() -> Self {
        Self::from_config(&Config::default(), false, false)
    }

    pub fn from_config(cfg: &Config, color: bool, symbols: bool) -> Self {
        Self {
            color,
            symbols,
            detail_threshold: cfg.detail_threshold,
            quiet_levels: cfg.quiet_levels.clone(),
            gutter_width: cfg.gutter_width,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::plain()
    }
}

/// Turns log lines into display blocks.
///
/// Holds no per-record state: every call is independent, and a shared
/// `&Formatter` can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct Formatter {
    opts: RenderOptions,
    theme: Theme,
}

impl Formatter {
    pub fn new(opts: RenderOptions) -> Self {
        let theme = Theme {
            color: opts.color,
            symbols: opts.symbols,
            gutter_width: opts.gutter_width,
        };
        Self { opts, theme }
    }

    /// Formats one line of input. Lines that are not structured records come
    /// back unchanged with a newline appended.
    pub fn format_line(&self, line: &str) -> String {
        match classify_line(line) {
            Classified::Structured(record) => self.render(*record),
            Classified::Unhandled(reason) => {
                debug!(%reason, "passing line through");
                format!("{line}{NEWLINE}")
            }
        }
    }

    /// Formats an already-decoded record. A JSON string is treated as a raw
    /// line.
    pub fn format_value(&self, value: Value) -> String {
        if let Value::String(line) = &value {
            return self.format_line(line);
        }
        let raw = value.to_string();
        match classify_value(value) {
            Classified::Structured(record) => self.render(*record),
            Classified::Unhandled(reason) => {
                debug!(%reason, "passing value through");
                format!("{raw}{NEWLINE}")
            }
        }
    }

    /// Renders a structured record as a newline-terminated block.
    pub fn render(&self, record: LogRecord) -> String {
        let LogRecord {
            time,
            level,
            ns,
            name,
            req_id,
            message,
            http,
            error,
            trace,
            extras,
        } = record;
        let theme = &self.theme;

        let mut header = Vec::with_capacity(12);
        header.push(time.map(|ts| tokens::date(theme, ts)));
        header.push(Some(tokens::level(theme, level)));
        header.push(Some(tokens::namespace(theme, &ns)));
        header.push(Some(tokens::name(theme, &name)));
        header.push(req_id.as_deref().map(|id| tokens::request_id(theme, id)));
        header.push(message.as_deref().map(|m| tokens::message(theme, m, level)));
        header.push(http.method.as_deref().map(|m| tokens::method(theme, m)));
        header.push(http.status.as_deref().map(|s| tokens::status(theme, s)));
        header.push(http.url.as_deref().map(|u| tokens::url(theme, u)));
        header.push(http.content_length.map(|b| tokens::size(theme, b)));
        header.push(http.response_time.map(|ms| tokens::duration(theme, ms)));

        let detail = if self.opts.quiet_levels.contains(&level) {
            Detail::None
        } else {
            detail::render(theme, &extras, self.opts.detail_threshold)
        };

        let mut detail_lines = Vec::new();
        match detail {
            Detail::None => {}
            Detail::Inline(summary) => header.push(Some(summary)),
            Detail::Block(lines) => detail_lines = lines,
        }

        let header_line = header
            .into_iter()
            .flatten()
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut lines = vec![header_line];
        lines.extend(detail_lines);
        let has_error = error.is_some();
        if let Some(err) = error {
            lines.extend(error_block(theme, err, trace.as_deref(), message.as_deref()));
        }
        if let Some(trace) = trace.as_deref() {
            lines.extend(trace_block(theme, trace, has_error));
        }

        assemble(&lines)
    }
}

/// Joins the non-blank lines of a record and terminates the block.
fn assemble(lines: &[String]) -> String {
    let mut out = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(NEWLINE);
    out.push_str(NEWLINE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_drops_blank_lines() {
        let lines = vec![
            "head".to_string(),
            "   ".to_string(),
            String::new(),
            "tail".to_string(),
        ];
        assert_eq!(assemble(&lines), format!("head{NEWLINE}tail{NEWLINE}"));
    }

    #[test]
    fn plain_options_follow_config_defaults() {
        let opts = RenderOptions::plain();
        assert!(!opts.color);
        assert!(!opts.symbols);
        assert_eq!(opts.detail_threshold, 160);
        assert_eq!(opts.quiet_levels, vec![Level::Info]);
    }
}
