// src/engine/tests.rs

//! Unit tests for neighbor counting, the B3/S23 rule and the double-buffered
//! simulation loop.

use super::*;
use crate::grid::{Cell, Dimensions, Grid};

// --- Test Helpers ---

fn dims(width: u8, height: u8) -> Dimensions {
    Dimensions::new(width, height).expect("valid test dimensions")
}

/// Builds a grid from rows of `.`/`#` characters.
fn grid_from(rows: &[&str]) -> Grid {
    let height = rows.len() as u8;
    let width = rows[0].len() as u8;
    let mut grid = Grid::new(dims(width, height));
    for (r, line) in rows.iter().enumerate() {
        assert_eq!(line.len(), width as usize, "ragged test pattern");
        for (c, ch) in line.chars().enumerate() {
            if ch == '#' {
                grid.set(r, c, Cell::Alive);
            }
        }
    }
    grid
}

/// Records frames and never sleeps.
#[derive(Default)]
struct RecordingSink {
    frames: Vec<(u64, Grid)>,
    pauses: usize,
}

impl FrameSink for RecordingSink {
    fn draw_frame(&mut self, grid: &Grid, generation: u64) -> Result<()> {
        self.frames.push((generation, grid.clone()));
        Ok(())
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}

// --- Neighbor Slots ---

#[test_log::test]
fn bounded_corner_has_three_neighbor_slots() {
    let d = dims(5, 4);
    assert_eq!(neighbors(d, Topology::Bounded, 0, 0).count(), 3);
    assert_eq!(neighbors(d, Topology::Bounded, 3, 4).count(), 3);
    assert_eq!(neighbors(d, Topology::Bounded, 0, 2).count(), 5);
    assert_eq!(neighbors(d, Topology::Bounded, 2, 2).count(), 8);
}

#[test_log::test]
fn toroidal_corner_has_eight_neighbor_slots() {
    let d = dims(3, 3);
    let mut slots: Vec<_> = neighbors(d, Topology::Toroidal, 0, 0).collect();
    slots.sort();
    assert_eq!(
        slots,
        vec![(0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
    );
}

#[test_log::test]
fn toroidal_wraps_to_opposite_edges() {
    let mut grid = Grid::new(dims(4, 4));
    grid.set(3, 3, Cell::Alive);
    assert_eq!(live_neighbors(&grid, Topology::Toroidal, 0, 0), 1);
    assert_eq!(live_neighbors(&grid, Topology::Bounded, 0, 0), 0);
}

#[test_log::test]
fn single_column_torus_never_counts_the_cell_itself() {
    let mut grid = Grid::new(dims(1, 4));
    grid.set(1, 0, Cell::Alive);
    assert!(neighbors(grid.dimensions(), Topology::Toroidal, 1, 0).all(|slot| slot != (1, 0)));
    assert_eq!(live_neighbors(&grid, Topology::Toroidal, 1, 0), 0);
}

// --- Rule ---

#[test_log::test]
fn rule_follows_b3_s23() {
    for n in 0..=8u8 {
        let survives = matches!(n, 2 | 3);
        assert_eq!(rule(Cell::Alive, n), Cell::from(survives), "alive with {}", n);
        assert_eq!(rule(Cell::Dead, n), Cell::from(n == 3), "dead with {}", n);
    }
}

// --- Stepping ---

#[test_log::test]
fn step_is_a_pure_function_of_the_previous_generation() {
    let current = grid_from(&[
        ".#..#.", //
        "##.#..", //
        "..###.", //
        "#....#", //
        ".##.#.",
    ]);
    let frozen = current.clone();
    let mut first = Grid::filled(current.dimensions(), Cell::Alive);
    let mut second = Grid::new(current.dimensions());
    for topology in [Topology::Bounded, Topology::Toroidal] {
        next_generation(&current, &mut first, topology);
        next_generation(&current, &mut second, topology);
        assert_eq!(first, second, "stale back buffer leaked into {:?}", topology);
        assert_eq!(current, frozen, "source mutated under {:?}", topology);
    }
}

#[test_log::test]
fn blinker_oscillates_and_never_converges() {
    let horizontal = grid_from(&["...", "###", "..."]);
    let vertical = grid_from(&[".#.", ".#.", ".#."]);
    let mut sim = Simulation::new(horizontal.clone(), Topology::Bounded);
    for generation in 1..=10u64 {
        assert_eq!(sim.step(), StepOutcome::Changed);
        let expected = if generation % 2 == 1 { &vertical } else { &horizontal };
        assert_eq!(sim.current(), expected, "generation {}", generation);
    }
    assert_eq!(sim.generation(), 10);
}

#[test_log::test]
fn lone_cell_dies_then_converges() {
    let mut sim = Simulation::new(
        grid_from(&["....", ".#..", "....", "...."]),
        Topology::Bounded,
    );
    assert_eq!(sim.step(), StepOutcome::Changed);
    assert_eq!(sim.current().live_count(), 0);
    assert_eq!(sim.step(), StepOutcome::Converged);
    assert_eq!(sim.step(), StepOutcome::Converged);
}

#[test_log::test]
fn block_still_life_converges_on_first_step() {
    let block = grid_from(&["....", ".##.", ".##.", "...."]);
    let mut sim = Simulation::new(block.clone(), Topology::Toroidal);
    assert_eq!(sim.step(), StepOutcome::Converged);
    assert_eq!(sim.current(), &block);
}

#[test_log::test]
fn glider_returns_to_start_on_a_torus() {
    let glider = grid_from(&[
        ".#....", //
        "..#...", //
        "###...", //
        "......", //
        "......", //
        "......",
    ]);
    let mut sim = Simulation::new(glider.clone(), Topology::Toroidal);
    // A glider moves one cell diagonally every 4 generations.
    for _ in 0..24 {
        assert_eq!(sim.step(), StepOutcome::Changed);
    }
    assert_eq!(sim.current(), &glider);
}

#[test_log::test]
fn glider_hitting_a_bounded_corner_becomes_a_block() {
    let glider = grid_from(&[
        ".#...", //
        "..#..", //
        "###..", //
        ".....", //
        ".....",
    ]);
    let mut sim = Simulation::new(glider, Topology::Bounded);
    let mut outcome = StepOutcome::Changed;
    for _ in 0..50 {
        outcome = sim.step();
        if outcome == StepOutcome::Converged {
            break;
        }
    }
    assert_eq!(outcome, StepOutcome::Converged);
    assert_eq!(
        sim.current(),
        &grid_from(&[".....", ".....", ".....", "...##", "...##"])
    );
}

// --- Run Loop ---

#[test_log::test]
fn run_draws_until_the_fixed_point_is_on_screen() {
    let mut sim = Simulation::new(
        grid_from(&["....", ".#..", "....", "...."]),
        Topology::Bounded,
    );
    let mut sink = RecordingSink::default();
    let outcome = sim.run(&mut sink).expect("run should succeed");

    assert_eq!(outcome, RunOutcome::Converged { generation: 2 });
    let generations: Vec<u64> = sink.frames.iter().map(|(g, _)| *g).collect();
    assert_eq!(generations, vec![0, 1]);
    assert_eq!(sink.pauses, 2);
    // The last frame drawn is the converged state.
    assert_eq!(&sink.frames[1].1, sim.current());
}

#[test_log::test]
fn run_stops_when_the_sink_fails() {
    struct Failing;
    impl FrameSink for Failing {
        fn draw_frame(&mut self, _: &Grid, _: u64) -> Result<()> {
            anyhow::bail!("terminal went away")
        }
        fn pause(&mut self) {}
    }

    let mut sim = Simulation::new(grid_from(&["...", "###", "..."]), Topology::Bounded);
    let err = sim.run(&mut Failing).expect_err("sink error must propagate");
    assert!(err.to_string().contains("terminal went away"));
    assert_eq!(sim.generation(), 0);
}
