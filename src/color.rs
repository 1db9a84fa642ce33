// src/color.rs

//! The eight standard ANSI colors and SGR escape assembly.

use serde::{Deserialize, Serialize};

pub const SGR_PREFIX: &str = "\x1b[";
pub const SGR_SUFFIX: char = 'm';
pub const SGR_SEPARATOR: char = ';';
/// Resets all attributes to the terminal default.
pub const SGR_RESET: &str = "\x1b[0m";

/// Standard ANSI named colors (indices 0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl NamedColor {
    /// SGR parameter selecting this color as the foreground.
    pub fn fg_code(self) -> u16 {
        30 + self as u16
    }

    /// SGR parameter selecting this color as the background.
    pub fn bg_code(self) -> u16 {
        40 + self as u16
    }
}

/// Formats `ESC [ p1 ; p2 ; ... m`.
pub fn sgr(codes: &[u16]) -> String {
    let params = codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&SGR_SEPARATOR.to_string());
    format!("{}{}{}", SGR_PREFIX, params, SGR_SUFFIX)
}

/// Background first, then foreground, as in `ESC[47;30m`.
pub fn sgr_pair(fg: NamedColor, bg: NamedColor) -> String {
    sgr(&[bg.bg_code(), fg.fg_code()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn codes_follow_the_ansi_table() {
        assert_eq!(NamedColor::Black.fg_code(), 30);
        assert_eq!(NamedColor::Green.fg_code(), 32);
        assert_eq!(NamedColor::White.bg_code(), 47);
    }

    #[test_log::test]
    fn pairs_put_background_first() {
        assert_eq!(sgr_pair(NamedColor::Black, NamedColor::White), "\x1b[47;30m");
        assert_eq!(sgr_pair(NamedColor::White, NamedColor::Black), "\x1b[40;37m");
        assert_eq!(sgr(&[0]), SGR_RESET);
    }
}
