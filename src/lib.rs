// src/lib.rs

//! Conway's Game of Life on a character grid.
//!
//! The `asciigol` binary animates a grid until it stops changing; the
//! `asciigolgen` binary paints a starting pattern and saves it in the
//! [`grid_file`] format the animator reads.

pub mod color;
pub mod editor;
pub mod engine;
pub mod grid;
pub mod grid_file;
pub mod initializer;
pub mod keys;
pub mod logging;
pub mod renderer;
pub mod settings;
pub mod terminal;
