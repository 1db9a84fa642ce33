// src/main.rs

//! `asciigol`: animates Conway's Game of Life in the terminal until the grid
//! stops changing.

use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use asciigol::engine::{FrameSink, RunOutcome, Simulation};
use asciigol::grid::Grid;
use asciigol::initializer;
use asciigol::logging;
use asciigol::renderer::{self, Background, RenderConfig};
use asciigol::settings::{Overrides, Settings};
use asciigol::terminal;

#[derive(Parser, Debug)]
#[command(name = "asciigol", version, about = "Conway's Game of Life in ASCII")]
struct Cli {
    /// Random grid width (ignored with --file)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=255))]
    width: Option<u8>,

    /// Random grid height (ignored with --file)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=255))]
    height: Option<u8>,

    /// Milliseconds between frames; 0 means the default of 50
    #[arg(long)]
    delay: Option<u16>,

    /// Glyph for live cells [default: #]
    #[arg(long)]
    live_char: Option<char>,

    /// Glyph for dead cells [default: space]
    #[arg(long)]
    dead_char: Option<char>,

    /// Load the initial grid from a file written by asciigolgen
    #[arg(long)]
    file: Option<PathBuf>,

    /// Opposite edges are neighbors
    #[arg(long)]
    wrap: bool,

    /// Background coloring
    #[arg(long, value_enum)]
    bg: Option<Background>,
}

impl Cli {
    fn overrides(self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            delay_ms: self.delay,
            live_char: self.live_char,
            dead_char: self.dead_char,
            background: self.bg,
            wrap: self.wrap,
            file: self.file,
        }
    }
}

/// Draws each generation over the previous one on stdout.
struct TerminalSink {
    out: BufWriter<Stdout>,
    config: RenderConfig,
    delay: Duration,
}

impl TerminalSink {
    fn new(config: RenderConfig, delay: Duration) -> io::Result<Self> {
        let mut out = BufWriter::new(io::stdout());
        terminal::clear_screen(&mut out)?;
        Ok(Self { out, config, delay })
    }
}

impl FrameSink for TerminalSink {
    fn draw_frame(&mut self, grid: &Grid, generation: u64) -> anyhow::Result<()> {
        terminal::home(&mut self.out)?;
        renderer::render(grid, &self.config, &mut self.out)
            .with_context(|| format!("Failed to draw generation {}", generation))?;
        self.out.flush().context("Failed to flush frame to stdout")?;
        Ok(())
    }

    fn pause(&mut self) {
        thread::sleep(self.delay);
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init()?;
    info!("Starting asciigol...");

    let settings = Settings::load()
        .context("Failed to load settings")?
        .with_overrides(cli.overrides());
    info!("Settings: {:?}", settings);

    let grid = match initializer::initialize(&settings.seed()) {
        Ok(grid) => grid,
        Err(e) => {
            error!("Initialization failed: {}", e);
            eprintln!("Result: {:?}: {}", e.kind(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut simulation = Simulation::new(grid, settings.topology());
    let mut sink = TerminalSink::new(settings.render_config(), settings.delay())
        .context("Failed to clear the screen")?;
    let RunOutcome::Converged { generation } = simulation.run(&mut sink)?;

    println!("Result: converged after {} generations", generation);
    Ok(ExitCode::SUCCESS)
}
