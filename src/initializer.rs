// src/initializer.rs

//! Produces the first generation, either from a grid file or at random.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::{Dimensions, Grid};
use crate::grid_file::{self, GridFileError};

/// Width of a random grid when none is requested.
pub const DEFAULT_WIDTH: u8 = 100;
/// Height of a random grid when none is requested.
pub const DEFAULT_HEIGHT: u8 = 40;

/// Where the first generation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// Load a grid file; its header decides the dimensions.
    File(PathBuf),
    /// Fill at random. A zero axis means the default for that axis.
    Random { width: u8, height: u8 },
}

/// Builds the initial grid described by `seed`.
///
/// On failure nothing is returned but the error; a partially parsed grid is
/// dropped before this returns.
pub fn initialize(seed: &Seed) -> Result<Grid, GridFileError> {
    match seed {
        Seed::File(path) => from_file(path),
        Seed::Random { width, height } => Ok(at_random(*width, *height)),
    }
}

pub fn from_file(path: &Path) -> Result<Grid, GridFileError> {
    let grid = grid_file::read_path(path)?;
    info!(
        "Initial grid loaded from {} ({}).",
        path.display(),
        grid.dimensions()
    );
    Ok(grid)
}

/// Random fill seeded from the wall clock, so every call differs.
pub fn at_random(width: u8, height: u8) -> Grid {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    info!("Random initial grid, clock seed {}.", seed);
    at_random_with(width, height, &mut StdRng::seed_from_u64(seed))
}

/// Random fill from a caller-supplied source.
pub fn at_random_with<R: Rng + ?Sized>(width: u8, height: u8, rng: &mut R) -> Grid {
    let dimensions = resolve_dimensions(width, height);
    info!("Filling {} grid at random.", dimensions);
    Grid::random(dimensions, rng)
}

fn resolve_dimensions(width: u8, height: u8) -> Dimensions {
    let width = if width == 0 { DEFAULT_WIDTH } else { width };
    let height = if height == 0 { DEFAULT_HEIGHT } else { height };
    Dimensions::saturating(width, height)
}
