//! Configuration and CLI argument handling

use crate::domain::{Direction, TimerEndChoice};
use crate::persistence::{bundled_defaults_file, user_state_file};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tima")]
#[command(about = "Per-project countdown timers you can cycle through", long_about = None)]
pub struct Cli {
    /// State file to load and save (defaults to ~/.tima/tima_projects.json)
    #[arg(long, global = true, env = "TIMA_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Read-only defaults used when the state file doesn't exist yet
    #[arg(long, global = true, env = "TIMA_DEFAULTS_FILE")]
    pub defaults_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count down the current project, one tick per second
    Run {
        /// What to do when a timer runs out: "stay" or "advance"
        #[arg(long, default_value = "advance", value_parser = parse_end_choice)]
        on_end: TimerEndChoice,
        /// Stop after this many ticks (runs until interrupted otherwise)
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Edit projects interactively, with undo
    Shell,
    /// Show all projects with their remaining time
    List,
    /// Add a project at the end of the list
    Add {
        name: String,
    },
    /// Delete the project at a position (1-based)
    Delete {
        position: usize,
    },
    /// Rename the project at a position (1-based)
    Rename {
        position: usize,
        name: String,
    },
    /// Pause or resume the project at a position (1-based)
    Pause {
        position: usize,
    },
    /// Reset the project at a position (1-based) to the default duration
    Reset {
        position: usize,
    },
    /// Switch to the next project
    Next,
    /// Switch to the previous project
    Prev,
    /// Move the project at a position (1-based) up or down
    Move {
        position: usize,
        #[arg(value_parser = parse_direction)]
        direction: Direction,
    },
    /// Set the default duration for new and reset projects
    Duration {
        hours: i64,
        #[arg(default_value = "0")]
        minutes: i64,
    },
    /// Replace the project list with names from a text file (one per line)
    Import {
        path: PathBuf,
    },
    /// Write the project names to a text file (one per line)
    Export {
        path: PathBuf,
    },
}

impl Cli {
    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve where state is loaded from and saved to
    pub fn state_paths(&self) -> Result<StatePaths> {
        let primary = match &self.data_file {
            Some(path) => path.clone(),
            None => user_state_file()?,
        };
        // A missing defaults file just means falling through to the seed projects
        let defaults = match &self.defaults_file {
            Some(path) => Some(path.clone()),
            None => bundled_defaults_file().ok(),
        };
        Ok(StatePaths::new(primary, defaults))
    }
}

/// Files the timer state is read from and written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    /// Per-user state file; the only file ever written
    pub primary: PathBuf,
    /// Bundled read-only defaults, consulted when `primary` is absent
    pub defaults: Option<PathBuf>,
}

impl StatePaths {
    pub fn new(primary: impl Into<PathBuf>, defaults: Option<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            defaults,
        }
    }
}

fn parse_end_choice(s: &str) -> Result<TimerEndChoice, String> {
    TimerEndChoice::from_tag(s)
        .ok_or_else(|| format!("expected \"stay\" or \"advance\", got \"{}\"", s))
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::from_tag(s).ok_or_else(|| format!("expected \"up\" or \"down\", got \"{}\"", s))
}

/// Convert a 1-based position from the command line into a list index
pub fn position_to_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}
