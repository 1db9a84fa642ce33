// src/terminal.rs

//! Terminal control: ANSI screen sequences and a scoped raw-mode guard.

use std::io::{self, Write};
use std::os::unix::io::RawFd;

use anyhow::{Context, Result};
use libc::STDIN_FILENO;
use log::{debug, error, warn};
use termios::{tcsetattr, Termios, ECHO, ICANON, ISIG, TCSANOW, VMIN, VTIME};

const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";

pub fn clear_screen<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(CLEAR_SCREEN.as_bytes())
}

/// Moves the cursor to the top-left corner so the next frame overdraws the last.
pub fn home<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(CURSOR_HOME.as_bytes())
}

/// Whether `fd` refers to a terminal.
pub fn is_terminal(fd: RawFd) -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(fd) == 1 }
}

/// Non-canonical, no-echo input on a terminal for as long as the guard lives.
///
/// Signal generation is switched off too, so Ctrl-C reaches the reader as a
/// `0x03` byte instead of killing the process with the terminal still raw.
/// The settings in force at acquisition are restored on drop, whichever way
/// the owning scope exits.
pub struct RawModeGuard {
    fd: RawFd,
    original: Option<Termios>,
}

impl RawModeGuard {
    /// Switches stdin to byte-at-a-time input without echo.
    pub fn acquire() -> Result<Self> {
        Self::acquire_fd(STDIN_FILENO)
    }

    pub fn acquire_fd(fd: RawFd) -> Result<Self> {
        if !is_terminal(fd) {
            warn!("fd {} is not a terminal; leaving input mode unchanged.", fd);
            return Ok(Self { fd, original: None });
        }
        let original = Termios::from_fd(fd).context("Failed to read terminal attributes")?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO | ISIG);
        raw.c_cc[VMIN] = 1;
        raw.c_cc[VTIME] = 0;
        tcsetattr(fd, TCSANOW, &raw).context("Failed to set non-canonical terminal mode")?;
        debug!("Terminal fd {} switched to non-canonical, no-echo mode.", fd);
        Ok(Self {
            fd,
            original: Some(original),
        })
    }

    /// True if the terminal settings were actually changed.
    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }

    fn restore(&mut self) -> Result<()> {
        if let Some(original) = self.original.take() {
            tcsetattr(self.fd, TCSANOW, &original)
                .context("Failed to restore original terminal attributes")?;
            debug!("Terminal fd {} restored.", self.fd);
        }
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("RawModeGuard: {:#}", e);
        }
    }
}
