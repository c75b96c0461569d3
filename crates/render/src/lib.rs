//! Rendering engine for structured log lines.
//!
//! ```text
//! line ──► classify ──► extract ──► tokens ─┐
//!                                   detail ─┼──► assemble ──► block
//!                                   errors ─┘
//! ```
//!
//! [`Formatter::format_line`] is the entry point: it never fails, and input
//! that is not a structured record is passed through verbatim.

pub mod detail;
pub mod errors;
pub mod formatter;
pub mod humanize;
pub mod theme;
pub mod tokens;

pub use formatter::{Formatter, RenderOptions};

/// Line terminator appended to every output block.
#[cfg(windows)]
pub const NEWLINE: &str = "\r\n";
#[cfg(not(windows))]
pub const NEWLINE: &str = "\n";
