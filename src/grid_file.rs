// src/grid_file.rs

//! Reading and writing the plain-text grid format shared by `asciigol` and
//! `asciigolgen`:
//!
//! ```text
//! asciigol
//! <width>,<height>
//! <height rows of width characters, each '0' or '1', each ending in '\n'>
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::grid::{Cell, Dimensions, Grid};

/// The exact first line of every grid file.
pub const HEADER: &str = "asciigol";

/// Why a grid file was rejected.
#[derive(Debug, Error)]
pub enum GridFileError {
    #[error("cannot open {}: {source}", .path.display())]
    BadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("first line must be exactly `asciigol`")]
    BadHeader,
    #[error("{0}")]
    BadDimension(String),
    #[error("invalid cell {found:?} at row {row}, column {col}; expected '0' or '1'")]
    BadCell { row: usize, col: usize, found: char },
}

/// Coarse classification of a [`GridFileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadFile,
    BadHeader,
    BadDimension,
    BadCell,
}

impl GridFileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridFileError::BadFile { .. } => ErrorKind::BadFile,
            GridFileError::BadHeader => ErrorKind::BadHeader,
            GridFileError::BadDimension(_) => ErrorKind::BadDimension,
            GridFileError::BadCell { .. } => ErrorKind::BadCell,
        }
    }
}

/// Splits off the first line. `None` if there is no newline.
fn split_line(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = bytes.iter().position(|&b| b == b'\n')?;
    Some((&bytes[..end], &bytes[end + 1..]))
}

fn parse_dimensions(line: &[u8]) -> Result<Dimensions, GridFileError> {
    let bad = || {
        GridFileError::BadDimension(format!(
            "dimension line {:?} is not `<width>,<height>` with both in 1..=255",
            String::from_utf8_lossy(line)
        ))
    };
    let text = std::str::from_utf8(line).map_err(|_| bad())?;
    let (width, height) = text.split_once(',').ok_or_else(bad)?;
    let width: i64 = width.trim().parse().map_err(|_| bad())?;
    let height: i64 = height.trim().parse().map_err(|_| bad())?;
    Dimensions::from_wide(width, height).ok_or_else(bad)
}

/// Parses a complete grid file held in memory.
pub fn parse(bytes: &[u8]) -> Result<Grid, GridFileError> {
    let (header, rest) = split_line(bytes).ok_or(GridFileError::BadHeader)?;
    if header != HEADER.as_bytes() {
        return Err(GridFileError::BadHeader);
    }

    let (dimension_line, body) = split_line(rest).ok_or_else(|| {
        GridFileError::BadDimension("missing `<width>,<height>` line".to_string())
    })?;
    let dimensions = parse_dimensions(dimension_line)?;
    let (width, height) = (dimensions.width(), dimensions.height());

    let mut cells = Vec::with_capacity(dimensions.area());
    let (mut row, mut col) = (0usize, 0usize);
    for &byte in body {
        if row >= height {
            return Err(GridFileError::BadDimension(format!(
                "more than the declared {} rows",
                height
            )));
        }
        if byte == b'\n' {
            if col < width {
                return Err(GridFileError::BadDimension(format!(
                    "row {} has {} cells, expected {}",
                    row, col, width
                )));
            }
            row += 1;
            col = 0;
            continue;
        }
        let cell = Cell::from_digit(byte).ok_or(GridFileError::BadCell {
            row,
            col,
            found: byte as char,
        })?;
        col += 1;
        if col > width {
            return Err(GridFileError::BadDimension(format!(
                "row {} is longer than the declared width {}",
                row, width
            )));
        }
        cells.push(cell);
    }
    if row < height {
        return Err(GridFileError::BadDimension(format!(
            "found {} complete rows, expected {}",
            row, height
        )));
    }

    Grid::from_cells(dimensions, cells).ok_or_else(|| {
        GridFileError::BadDimension(format!("cell count does not match {}", dimensions))
    })
}

/// Reads and parses the grid file at `path`.
pub fn read_path(path: &Path) -> Result<Grid, GridFileError> {
    let bytes = fs::read(path).map_err(|source| GridFileError::BadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse(&bytes).map_err(|e| {
        debug!("Rejected grid file {}: {}", path.display(), e);
        e
    })?;
    debug!("Loaded {} grid from {}.", grid.dimensions(), path.display());
    Ok(grid)
}

/// Serializes `grid` in the grid file format.
pub fn write<W: Write>(grid: &Grid, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    writeln!(out, "{},{}", grid.width(), grid.height())?;
    for row in grid.rows() {
        let line: String = row.iter().map(|cell| cell.as_digit()).collect();
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Creates (or truncates) `path` and writes `grid` to it.
pub fn write_path(path: &Path, grid: &Grid) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write(grid, &mut out)?;
    out.flush()?;
    debug!("Wrote {} grid to {}.", grid.dimensions(), path.display());
    Ok(())
}
