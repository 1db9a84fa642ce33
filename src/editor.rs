// src/editor.rs

//! Interactive pattern editor behind `asciigolgen`.
//!
//! The editor holds one grid and a highlighted cell. Each round it draws the
//! grid with the highlight in green, reads one key, and then sets the
//! highlighted cell, moves the highlight (clamped to the grid), or stops.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{info, trace};
use thiserror::Error;

use crate::color::{sgr, NamedColor, SGR_RESET};
use crate::grid::{Cell, Dimensions, Grid};
use crate::grid_file;
use crate::keys::{EditorKey, KeyDecoder};
use crate::terminal;

/// Legend printed under the grid.
pub const CONTROLS: &str = "Move: Up, Down, Left, Right\nModify: 0, 1\nQuit: q";

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("input closed before `q` was pressed; nothing was saved")]
    InputClosed,
    #[error("interrupted; nothing was saved")]
    Aborted,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cannot save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether the session should keep going after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Editing,
    Done,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    row: usize,
    col: usize,
}

impl Editor {
    /// A grid with every cell set to `initial` and the highlight at the top-left.
    pub fn new(dimensions: Dimensions, initial: Cell) -> Self {
        Self {
            grid: Grid::filled(dimensions, initial),
            row: 0,
            col: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// `(row, col)` of the highlighted cell.
    pub fn highlight(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Moves the highlight one step; a move off the grid does nothing.
    pub fn move_highlight(&mut self, key: EditorKey) {
        match key {
            EditorKey::Up => self.row = self.row.saturating_sub(1),
            EditorKey::Down if self.row + 1 < self.grid.height() => self.row += 1,
            EditorKey::Left => self.col = self.col.saturating_sub(1),
            EditorKey::Right if self.col + 1 < self.grid.width() => self.col += 1,
            _ => {}
        }
    }

    pub fn apply(&mut self, key: EditorKey) -> EditorStatus {
        match key {
            EditorKey::Quit => return EditorStatus::Done,
            EditorKey::Abort => return EditorStatus::Aborted,
            EditorKey::Set(cell) => self.grid.set(self.row, self.col, cell),
            arrow if arrow.is_arrow() => self.move_highlight(arrow),
            _ => {}
        }
        trace!("{:?} -> highlight at {:?}.", key, self.highlight());
        EditorStatus::Editing
    }

    /// Draws the grid as `0`/`1` digits with the highlight in green, then the legend.
    pub fn render_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let highlight_on = sgr(&[NamedColor::Green.fg_code()]);
        let mut text = String::with_capacity(self.grid.cells().len() * 2 + CONTROLS.len() + 16);
        for (r, row) in self.grid.rows().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if (r, c) == self.highlight() {
                    text.push_str(&highlight_on);
                    text.push(cell.as_digit());
                    text.push_str(SGR_RESET);
                } else {
                    text.push(cell.as_digit());
                }
            }
            text.push('\n');
        }
        text.push('\n');
        text.push_str(CONTROLS);
        text.push('\n');
        out.write_all(text.as_bytes())
    }

    /// Runs the draw/read loop until `q`.
    ///
    /// Fails with [`EditorError::InputClosed`] if `input` ends first, and with
    /// [`EditorError::Aborted`] on Ctrl-C.
    pub fn run_session<R: Read, W: Write + ?Sized>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), EditorError> {
        let mut keys = KeyDecoder::new(input);
        terminal::clear_screen(output)?;
        loop {
            terminal::home(output)?;
            self.render_to(output)?;
            output.flush()?;
            let key = keys.next_key()?.ok_or(EditorError::InputClosed)?;
            match self.apply(key) {
                EditorStatus::Editing => {}
                EditorStatus::Done => return Ok(()),
                EditorStatus::Aborted => return Err(EditorError::Aborted),
            }
        }
    }

    /// Writes the grid in the grid file format.
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        grid_file::write_path(path, &self.grid).map_err(|source| EditorError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved {} pattern to {}.", self.grid.dimensions(), path.display());
        Ok(())
    }
}
