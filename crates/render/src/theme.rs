//! Styling primitives: semantic tones, symbol marks and the block gutter.

use owo_colors::OwoColorize;
use vice_core::Level;

/// Semantic style tag. Mapped to concrete terminal colors by [`Theme::paint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Namespace,
    Name,
    RequestId,
    Red,
    White,
    Magenta,
    Yellow,
    Green,
    Alarm,
}

/// Per-level glyph and color.
#[derive(Debug, Clone, Copy)]
pub struct LevelStyle {
    pub glyph: &'static str,
    /// Glyphs that render one column wide get a trailing pad.
    pub narrow: bool,
    pub tone: Tone,
}

const LEVEL_STYLES: [LevelStyle; 7] = [
    LevelStyle { glyph: "🔍", narrow: false, tone: Tone::White },
    LevelStyle { glyph: "🐛", narrow: false, tone: Tone::Yellow },
    LevelStyle { glyph: "✨", narrow: false, tone: Tone::Green },
    LevelStyle { glyph: "⚠️", narrow: true, tone: Tone::Magenta },
    LevelStyle { glyph: "🚨", narrow: false, tone: Tone::Red },
    LevelStyle { glyph: "💀", narrow: false, tone: Tone::Alarm },
    LevelStyle { glyph: "💬", narrow: false, tone: Tone::Green },
];

pub fn level_style(level: Level) -> &'static LevelStyle {
    &LEVEL_STYLES[level.index()]
}

pub const ERROR_MARK: &str = "🧨";
pub const STACK_MARK: &str = "💥";
const GUTTER_MARK: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
    pub symbols: bool,
    pub gutter_width: usize,
}

impl Theme {
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Muted => text.bright_black().to_string(),
            Tone::Namespace => text.cyan().to_string(),
            Tone::Name => text.blue().to_string(),
            Tone::RequestId => text.bright_blue().to_string(),
            Tone::Red => text.red().to_string(),
            Tone::White => text.white().to_string(),
            Tone::Magenta => text.magenta().to_string(),
            Tone::Yellow => text.yellow().to_string(),
            Tone::Green => text.green().to_string(),
            Tone::Alarm => text.white().on_red().to_string(),
        }
    }

    /// A block mark, or nothing when symbols are unavailable.
    pub fn mark(&self, mark: &'static str) -> &'static str {
        if self.symbols { mark } else { "" }
    }

    /// Prefixes `line` with the fixed-width gutter and its vertical marker.
    pub fn indent(&self, line: &str) -> String {
        format!(
            "{}{}{line}",
            " ".repeat(self.gutter_width),
            self.paint(Tone::Muted, GUTTER_MARK)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(color: bool) -> Theme {
        Theme {
            color,
            symbols: true,
            gutter_width: 9,
        }
    }

    #[test]
    fn plain_theme_leaves_text_alone() {
        assert_eq!(theme(false).paint(Tone::Red, "boom"), "boom");
        assert_eq!(theme(false).indent("x"), "         |x");
    }

    #[test]
    fn color_theme_emits_ansi() {
        let painted = theme(true).paint(Tone::Red, "boom");
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("boom"));
        assert_eq!(theme(true).paint(Tone::Red, ""), "");
    }

    #[test]
    fn every_level_has_a_distinct_glyph() {
        let mut glyphs: Vec<_> = Level::ALL.iter().map(|l| level_style(*l).glyph).collect();
        glyphs.sort();
        glyphs.dedup();
        assert_eq!(glyphs.len(), Level::ALL.len());
    }

    #[test]
    fn level_tones() {
        let expected = [
            (Level::Trace, Tone::White),
            (Level::Debug, Tone::Yellow),
            (Level::Info, Tone::Green),
            (Level::Warn, Tone::Magenta),
            (Level::Error, Tone::Red),
            (Level::Fatal, Tone::Alarm),
            (Level::User, Tone::Green),
        ];
        for (level, tone) in expected {
            assert_eq!(level_style(level).tone, tone, "{level}");
        }
    }

    #[test]
    fn marks_follow_symbol_support() {
        let mut t = theme(false);
        assert_eq!(t.mark(ERROR_MARK), ERROR_MARK);
        t.symbols = false;
        assert_eq!(t.mark(STACK_MARK), "");
    }
}
