// src/settings.rs

//! Run settings for the animator.
//!
//! Settings come from three layers, lowest first: the built-in defaults, an
//! optional JSON file named by `ASCIIGOL_SETTINGS`, and the command-line flags
//! that were actually given.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Topology;
use crate::initializer::{Seed, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::renderer::{Background, RenderConfig};

/// Environment variable naming a JSON settings file.
pub const SETTINGS_ENV: &str = "ASCIIGOL_SETTINGS";

/// Pause between frames when none (or zero) is configured.
pub const DEFAULT_DELAY_MS: u16 = 50;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the animator needs to know before the first frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Random grid width. Zero means the default; ignored when `file` is set.
    pub width: u8,
    /// Random grid height. Zero means the default; ignored when `file` is set.
    pub height: u8,
    /// Milliseconds between frames. Zero means the default.
    pub delay_ms: u16,
    pub live_char: Option<char>,
    pub dead_char: Option<char>,
    pub background: Background,
    /// Toroidal topology when true.
    pub wrap: bool,
    /// Initial grid file. Random fill when absent.
    pub file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            delay_ms: DEFAULT_DELAY_MS,
            live_char: None,
            dead_char: None,
            background: Background::None,
            wrap: false,
            file: None,
        }
    }
}

/// Values given on the command line; `None` leaves the setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<u8>,
    pub height: Option<u8>,
    pub delay_ms: Option<u16>,
    pub live_char: Option<char>,
    pub dead_char: Option<char>,
    pub background: Option<Background>,
    /// `--wrap` can only switch wrapping on.
    pub wrap: bool,
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Defaults, or the file named by `ASCIIGOL_SETTINGS` when it is set.
    pub fn load() -> Result<Self, SettingsError> {
        match env::var_os(SETTINGS_ENV) {
            Some(path) => Self::from_json_path(Path::new(&path)),
            None => {
                debug!("{} not set; using default settings.", SETTINGS_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Reads settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Settings loaded from {}.", path.display());
        Ok(settings)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(delay_ms) = overrides.delay_ms {
            self.delay_ms = delay_ms;
        }
        if overrides.live_char.is_some() {
            self.live_char = overrides.live_char;
        }
        if overrides.dead_char.is_some() {
            self.dead_char = overrides.dead_char;
        }
        if let Some(background) = overrides.background {
            self.background = background;
        }
        self.wrap |= overrides.wrap;
        if overrides.file.is_some() {
            self.file = overrides.file;
        }
        self
    }

    pub fn delay(&self) -> Duration {
        let ms = if self.delay_ms == 0 {
            DEFAULT_DELAY_MS
        } else {
            self.delay_ms
        };
        Duration::from_millis(u64::from(ms))
    }

    pub fn topology(&self) -> Topology {
        Topology::from_wrap(self.wrap)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            live_char: self.live_char,
            dead_char: self.dead_char,
            background: self.background,
        }
    }

    pub fn seed(&self) -> Seed {
        match &self.file {
            Some(path) => Seed::File(path.clone()),
            None => Seed::Random {
                width: self.width,
                height: self.height,
            },
        }
    }
}
