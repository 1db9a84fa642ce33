// src/renderer.rs

//! Projects a grid onto a character stream.
//!
//! Rendering is a pure function of the grid and a [`RenderConfig`]; it never
//! touches simulation state. One glyph is emitted per cell and a newline after
//! every row. With a background mode selected, each cell is preceded by an SGR
//! color pair and each row ends with an attribute reset.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::color::{sgr_pair, NamedColor, SGR_RESET};
use crate::grid::{Cell, Grid};

pub const DEFAULT_LIVE_CHAR: char = '#';
pub const DEFAULT_DEAD_CHAR: char = ' ';

/// Background coloring mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Terminal default colors; no escape sequences.
    #[default]
    None,
    /// Black glyphs on white.
    Light,
    /// White glyphs on black.
    Dark,
}

impl Background {
    /// Foreground/background pair for a cell, or `None` when uncolored.
    ///
    /// `inverted` swaps the pair; it is used for dead cells whose glyph is
    /// the same as the live glyph.
    fn colors(self, inverted: bool) -> Option<(NamedColor, NamedColor)> {
        let light = (NamedColor::Black, NamedColor::White);
        let dark = (NamedColor::White, NamedColor::Black);
        match (self, inverted) {
            (Background::None, _) => None,
            (Background::Light, false) | (Background::Dark, true) => Some(light),
            (Background::Dark, false) | (Background::Light, true) => Some(dark),
        }
    }
}

/// Presentation settings. `None` glyphs fall back to `#` and space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub live_char: Option<char>,
    pub dead_char: Option<char>,
    pub background: Background,
}

impl RenderConfig {
    pub fn live_glyph(&self) -> char {
        self.live_char.unwrap_or(DEFAULT_LIVE_CHAR)
    }

    pub fn dead_glyph(&self) -> char {
        self.dead_char.unwrap_or(DEFAULT_DEAD_CHAR)
    }

    /// True when both glyphs were set explicitly to the same character.
    pub fn glyphs_coincide(&self) -> bool {
        matches!((self.live_char, self.dead_char), (Some(live), Some(dead)) if live == dead)
    }

    fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Alive => self.live_glyph(),
            Cell::Dead => self.dead_glyph(),
        }
    }
}

/// Writes one frame of `grid` to `out`.
pub fn render<W: Write + ?Sized>(grid: &Grid, config: &RenderConfig, out: &mut W) -> io::Result<()> {
    out.write_all(render_to_string(grid, config).as_bytes())
}

/// One frame of `grid` as text, rows separated by newlines.
pub fn render_to_string(grid: &Grid, config: &RenderConfig) -> String {
    let colored = config.background != Background::None;
    let invert_dead = config.glyphs_coincide();
    let per_cell = if colored { 10 } else { 1 };
    let mut frame = String::with_capacity(grid.height() * (grid.width() * per_cell + 8));
    for row in grid.rows() {
        for &cell in row {
            let inverted = invert_dead && !cell.is_alive();
            if let Some((fg, bg)) = config.background.colors(inverted) {
                frame.push_str(&sgr_pair(fg, bg));
            }
            frame.push(config.glyph(cell));
        }
        if colored {
            frame.push_str(SGR_RESET);
        }
        frame.push('\n');
    }
    frame
}
