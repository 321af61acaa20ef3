//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::ChordError;
use crate::keyboard::{Keyboard, Spelling};
use crate::pitch::PitchClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tuichords", version, about = "Show chords and their inversions on a piano keyboard")]
pub struct Cli {
    /// Root note, e.g. C, F#, Bb
    #[arg(short, long, default_value = "C")]
    pub root: String,

    /// Chord type, e.g. major, m7, maj9, add9
    #[arg(short = 't', long = "type", default_value = "major")]
    pub chord_type: String,

    /// Inversion (0 = root position)
    #[arg(short, long, default_value_t = 0)]
    pub inversion: usize,

    /// How black keys are named
    #[arg(long, value_enum, default_value = "sharps")]
    pub spelling: Spelling,

    /// Lowest keyboard key
    #[arg(long, default_value = Keyboard::DEFAULT_START)]
    pub start: String,

    /// Highest keyboard key
    #[arg(long, default_value = Keyboard::DEFAULT_END)]
    pub end: String,

    /// Print the chord once instead of starting the interactive view
    #[arg(long, value_enum)]
    pub print: Option<OutputFormat>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated settings the app starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: String,
    pub chord_type: String,
    pub inversion: usize,
    pub keyboard: Keyboard,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: "C".to_string(),
            chord_type: "major".to_string(),
            inversion: 0,
            keyboard: Keyboard::default(),
        }
    }
}

impl Cli {
    /// Check the root and keyboard range. The chord type is not checked: an
    /// unknown type shows an empty chord.
    pub fn settings(&self) -> Result<Settings, ChordError> {
        let root = PitchClass::parse(&self.root)?;
        Ok(Settings {
            root: root.to_string(),
            chord_type: self.chord_type.clone(),
            inversion: self.inversion,
            keyboard: Keyboard::new(&self.start, &self.end, self.spelling)?,
        })
    }
}
