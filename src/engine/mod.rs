// src/engine/mod.rs

//! The simulation engine.
//!
//! Owns two same-sized grids: the active generation, which is rendered and
//! read during neighbor counting, and a back buffer that receives the next
//! generation. A step never writes the active grid; once the back buffer is
//! complete the two are swapped, so every generation is a pure function of
//! the one before it.

use std::mem;

use anyhow::Result;
use log::{debug, info, trace};

use crate::grid::{Cell, Dimensions, Grid};

#[cfg(test)]
mod tests;

/// Relative positions of the eight Moore neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How edge cells see past the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Off-grid neighbors do not exist; corners have 3 neighbors, edges 5.
    Bounded,
    /// Opposite edges are adjacent.
    Toroidal,
}

impl Topology {
    pub fn from_wrap(wrap: bool) -> Self {
        if wrap {
            Topology::Toroidal
        } else {
            Topology::Bounded
        }
    }

    /// Maps `pos + delta` onto an axis of length `len`, or `None` if the
    /// position falls off a bounded axis.
    fn resolve(self, pos: usize, delta: isize, len: usize) -> Option<usize> {
        match self {
            Topology::Bounded => pos
                .checked_add_signed(delta)
                .filter(|&shifted| shifted < len),
            Topology::Toroidal => Some((pos + len).wrapping_add_signed(delta) % len),
        }
    }
}

/// Result of advancing one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// At least one cell changed state.
    Changed,
    /// No cell changed; the grid is a fixed point.
    Converged,
}

/// How a run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The generation numbered `generation` equalled its predecessor.
    Converged { generation: u64 },
}

/// Coordinates of the neighbor slots of `(row, col)`.
///
/// Bounded grids yield 3 slots at a corner, 5 along an edge and 8 inside.
/// Toroidal grids yield 8 everywhere, except on axes shorter than 3 where a
/// wrapped slot can land back on the cell itself; such slots are skipped.
pub fn neighbors(
    dimensions: Dimensions,
    topology: Topology,
    row: usize,
    col: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let (width, height) = (dimensions.width(), dimensions.height());
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(move |&(dr, dc)| {
            let r = topology.resolve(row, dr, height)?;
            let c = topology.resolve(col, dc, width)?;
            Some((r, c))
        })
        .filter(move |&slot| slot != (row, col))
}

/// Number of live cells among the neighbor slots of `(row, col)`.
pub fn live_neighbors(grid: &Grid, topology: Topology, row: usize, col: usize) -> u8 {
    neighbors(grid.dimensions(), topology, row, col)
        .filter(|&(r, c)| grid.get(r, c).is_alive())
        .count() as u8
}

/// B3/S23.
pub fn rule(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Writes the generation after `current` into `next`.
///
/// `next` is overwritten in full; its previous contents are never read.
///
/// # Panics
/// Panics if the two grids differ in size.
pub fn next_generation(current: &Grid, next: &mut Grid, topology: Topology) -> StepOutcome {
    assert_eq!(
        current.dimensions(),
        next.dimensions(),
        "generation buffers must share dimensions"
    );
    let width = current.width();
    let mut changed = false;
    for (idx, slot) in next.cells_mut().iter_mut().enumerate() {
        let (row, col) = (idx / width, idx % width);
        let cell = current.cells()[idx];
        let updated = rule(cell, live_neighbors(current, topology, row, col));
        changed |= updated != cell;
        *slot = updated;
    }
    if changed {
        StepOutcome::Changed
    } else {
        StepOutcome::Converged
    }
}

/// Receives frames from [`Simulation::run`].
pub trait FrameSink {
    /// Shows `grid`, the generation numbered `generation`.
    fn draw_frame(&mut self, grid: &Grid, generation: u64) -> Result<()>;

    /// Blocks between frames.
    fn pause(&mut self);
}

/// A double-buffered Game of Life.
#[derive(Debug, Clone)]
pub struct Simulation {
    active: Grid,
    back: Grid,
    topology: Topology,
    generation: u64,
}

impl Simulation {
    /// Takes ownership of the initial generation and allocates a matching back buffer.
    pub fn new(initial: Grid, topology: Topology) -> Self {
        let back = Grid::new(initial.dimensions());
        debug!(
            "Simulation created: {} grid, {:?} topology, {} live cells.",
            initial.dimensions(),
            topology,
            initial.live_count()
        );
        Self {
            active: initial,
            back,
            topology,
            generation: 0,
        }
    }

    /// The generation currently on display.
    pub fn current(&self) -> &Grid {
        &self.active
    }

    /// How many steps have been taken.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Computes the next generation into the back buffer, then swaps buffers.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = next_generation(&self.active, &mut self.back, self.topology);
        mem::swap(&mut self.active, &mut self.back);
        self.generation += 1;
        trace!(
            "Generation {}: {:?}, {} live cells.",
            self.generation,
            outcome,
            self.active.live_count()
        );
        outcome
    }

    /// Draws, steps and pauses until the grid stops changing.
    ///
    /// The converged generation is identical to the last frame drawn, so the
    /// fixed point is always on screen when this returns.
    pub fn run<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunOutcome> {
        loop {
            sink.draw_frame(&self.active, self.generation)?;
            let outcome = self.step();
            sink.pause();
            if outcome == StepOutcome::Converged {
                info!("Converged at generation {}.", self.generation);
                return Ok(RunOutcome::Converged {
                    generation: self.generation,
                });
            }
        }
    }
}
