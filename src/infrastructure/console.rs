//! ANSI colors for terminal text and generated scripts

use serde::{Deserialize, Serialize};

/// Foreground colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Terminal default
    #[default]
    Reset,
    /// Black
    Black,
    /// Red
    Red,
    /// Green
    Green,
    /// Yellow
    Yellow,
    /// Blue
    Blue,
    /// Magenta
    Magenta,
    /// Cyan
    Cyan,
    /// White
    White,
}

impl Color {
    fn sgr(self) -> u8 {
        match self {
            Self::Reset => 0,
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }

    /// Escape sequence to write to a terminal
    #[must_use]
    pub fn code(self) -> String {
        format!("\x1b[{}m", self.sgr())
    }

    /// Escape sequence spelled for `printf` in a shell script
    #[must_use]
    pub fn shell_escape(self) -> String {
        format!("\\033[{}m", self.sgr())
    }
}

/// Wraps `text` in escape codes so it prints in `color`
///
/// Does not write anything. `Color::Reset` returns the text unchanged.
#[must_use]
pub fn colorize(text: &str, color: Color) -> String {
    if color == Color::Reset {
        return text.to_string();
    }

    format!("{}{}{}", color.code(), text, Color::Reset.code())
}
