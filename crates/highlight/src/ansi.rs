//! ANSI terminal rendering of highlight runs
//!
//! Turns a run sequence into one string with SGR escape codes around the
//! highlighted segments. Plain segments pass through untouched, so stripping
//! the escapes recovers the original document.

use lodestone_core::HighlightRun;
use serde::{Deserialize, Serialize};

/// The sixteen standard terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnsiColor {
    /// SGR color 0
    Black,
    /// SGR color 1
    Red,
    /// SGR color 2
    Green,
    /// SGR color 3
    Yellow,
    /// SGR color 4
    Blue,
    /// SGR color 5
    Magenta,
    /// SGR color 6
    Cyan,
    /// SGR color 7
    White,
    /// SGR color 8
    BrightBlack,
    /// SGR color 9
    BrightRed,
    /// SGR color 10
    BrightGreen,
    /// SGR color 11
    BrightYellow,
    /// SGR color 12
    BrightBlue,
    /// SGR color 13
    BrightMagenta,
    /// SGR color 14
    BrightCyan,
    /// SGR color 15
    BrightWhite,
}

impl AnsiColor {
    /// SGR code selecting this color as the foreground
    pub fn foreground_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }

    /// SGR code selecting this color as the background
    pub fn background_code(self) -> u8 {
        self.foreground_code() + 10
    }
}

/// Colors applied to highlighted segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsiStyle {
    /// Foreground of highlighted text
    pub color: AnsiColor,
    /// Background of highlighted text
    pub background: AnsiColor,
}

impl Default for AnsiStyle {
    fn default() -> Self {
        Self {
            color: AnsiColor::Black,
            background: AnsiColor::BrightWhite,
        }
    }
}

impl AnsiStyle {
    /// Override the foreground color
    pub fn with_color(mut self, color: AnsiColor) -> Self {
        self.color = color;
        self
    }

    /// Override the background color
    pub fn with_background(mut self, background: AnsiColor) -> Self {
        self.background = background;
        self
    }
}

/// Render runs into one string, wrapping highlighted segments in SGR escapes
pub fn render_ansi(runs: &[HighlightRun], style: AnsiStyle) -> String {
    let mut rendered = String::new();
    for run in runs {
        if run.highlight {
            rendered.push_str(&format!(
                "\x1b[{};{}m{}\x1b[0m",
                style.color.foreground_code(),
                style.background.background_code(),
                run.text
            ));
        } else {
            rendered.push_str(&run.text);
        }
    }
    rendered
}
