// src/bin/asciigolgen.rs

//! `asciigolgen`: paints a starting pattern for `asciigol` and saves it.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use asciigol::editor::Editor;
use asciigol::grid::{Cell, Dimensions};
use asciigol::logging;
use asciigol::terminal::RawModeGuard;

#[derive(Parser, Debug)]
#[command(name = "asciigolgen", version, about = "Draw a Game of Life starting pattern")]
struct Cli {
    /// Where to save the pattern
    #[arg(long)]
    file: PathBuf,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=255))]
    width: u8,

    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=255))]
    height: u8,

    /// State every cell starts in: 0 (dead) or 1 (alive)
    #[arg(long, value_parser = parse_cell)]
    cell: Cell,
}

fn parse_cell(value: &str) -> Result<Cell, String> {
    let cell = match value.as_bytes() {
        [digit] => Cell::from_digit(*digit),
        _ => None,
    };
    cell.ok_or_else(|| format!("`{}` is not 0 or 1", value))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init()?;
    info!("Starting asciigolgen for {}...", cli.file.display());

    let dimensions = Dimensions::saturating(cli.width, cli.height);
    let mut editor = Editor::new(dimensions, cli.cell);

    let session = {
        let raw_mode = RawModeGuard::acquire().context("Failed to prepare the terminal")?;
        if !raw_mode.is_active() {
            info!("stdin is not a terminal; reading keys from it as plain bytes.");
        }
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        editor.run_session(stdin.lock(), &mut stdout)
    };

    match session.and_then(|()| editor.save(&cli.file)) {
        Ok(()) => {
            println!("Result: saved {} pattern to {}", dimensions, cli.file.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Editor session failed: {}", e);
            eprintln!("Result: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
