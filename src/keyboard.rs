//! Piano keyboard layout.
//!
//! A [`Keyboard`] spans a range of MIDI notes and names each key by a fixed
//! spelling convention, independent of how any chord spells its notes.

use std::fmt;

use crate::error::ChordError;
use crate::pitch::Note;

// ── Spelling convention ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sharps => "Sharps",
            Self::Flats  => "Flats",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Sharps => Self::Flats,
            Self::Flats  => Self::Sharps,
        }
    }

    /// Key name for semitone 0 (C) … 11 (B).
    pub fn pitch_class(self, semitone: u8) -> &'static str {
        const SHARPS: [&str; 12] = ["C","C#","D","D#","E","F","F#","G","G#","A","A#","B"];
        const FLATS:  [&str; 12] = ["C","Db","D","Eb","E","F","Gb","G","Ab","A","Bb","B"];
        let i = (semitone % 12) as usize;
        match self {
            Self::Sharps => SHARPS[i],
            Self::Flats  => FLATS[i],
        }
    }
}

// ── Keys ──────────────────────────────────────────────────────────────────────

/// One physical key, as handed to the render callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PianoKey {
    pub pitch_class: &'static str,
    pub octave: i8,
    /// Black key.
    pub accidental: bool,
    pub midi: u8,
}

impl PianoKey {
    fn new(midi: u8, spelling: Spelling) -> Self {
        let semitone = midi % 12;
        Self {
            pitch_class: spelling.pitch_class(semitone),
            octave: (midi / 12) as i8 - 1,
            accidental: matches!(semitone, 1 | 3 | 6 | 8 | 10),
            midi,
        }
    }
}

/// Key name with octave, e.g. `C#4`.
impl fmt::Display for PianoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyboard {
    pub start: u8,
    pub end: u8,
    pub spelling: Spelling,
}

impl Keyboard {
    pub const DEFAULT_START: &'static str = "C3";
    pub const DEFAULT_END: &'static str = "C6";

    /// Keyboard from `start` to `end` inclusive, both notes with octave.
    pub fn new(start: &str, end: &str, spelling: Spelling) -> Result<Self, ChordError> {
        let midi = |s: &str| {
            Note::parse(s)?
                .midi()
                .ok_or_else(|| ChordError::OutOfRange(s.to_string()))
        };
        let (lo, hi) = (midi(start)?, midi(end)?);
        if lo > hi {
            return Err(ChordError::InvalidRange { start: start.to_string(), end: end.to_string() });
        }
        Ok(Self { start: lo, end: hi, spelling })
    }

    pub fn keys(&self) -> impl Iterator<Item = PianoKey> + '_ {
        (self.start..=self.end).map(|midi| PianoKey::new(midi, self.spelling))
    }

    /// Call `render` once per key, lowest first, and collect what it returns.
    pub fn render_keys<R>(&self, mut render: impl FnMut(&PianoKey) -> R) -> Vec<R> {
        self.keys().map(|key| render(&key)).collect()
    }

    /// Number of keys. Never zero.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        // C3 = 48, C6 = 84
        Self { start: 48, end: 84, spelling: Spelling::Sharps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let kb = Keyboard::new(Keyboard::DEFAULT_START, Keyboard::DEFAULT_END, Spelling::Sharps).unwrap();
        assert_eq!(kb, Keyboard::default());
        assert_eq!(kb.len(), 37);
        assert_eq!(kb.keys().filter(|k| k.accidental).count(), 15);
        let names = kb.render_keys(|k| k.to_string());
        assert_eq!(names.first().map(String::as_str), Some("C3"));
        assert_eq!(names.last().map(String::as_str), Some("C6"));
        assert_eq!(names[1], "C#3");
    }

    #[test]
    fn test_flat_spelling() {
        let kb = Keyboard::new("C4", "B4", Spelling::Flats).unwrap();
        let names: Vec<_> = kb.keys().map(|k| k.pitch_class).collect();
        assert_eq!(names, ["C","Db","D","Eb","E","F","Gb","G","Ab","A","Bb","B"]);
    }

    #[test]
    fn test_single_key_range() {
        let kb = Keyboard::new("A4", "A4", Spelling::Sharps).unwrap();
        let keys: Vec<_> = kb.keys().collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].midi, 69);
        assert!(!keys[0].accidental);
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(
            Keyboard::new("C6", "C3", Spelling::Sharps),
            Err(ChordError::InvalidRange { start: "C6".into(), end: "C3".into() })
        );
        assert!(matches!(Keyboard::new("C", "C6", Spelling::Sharps), Err(ChordError::InvalidNote(_))));
    }

    #[test]
    fn test_render_callback_sees_every_key_in_order() {
        let kb = Keyboard::new("E4", "G4", Spelling::Sharps).unwrap();
        let mut seen = Vec::new();
        let rendered = kb.render_keys(|k| {
            seen.push(k.midi);
            k.accidental
        });
        assert_eq!(seen, [64, 65, 66, 67]);
        assert_eq!(rendered, [false, false, true, false]);
    }

    #[test]
    fn test_spelling_cycles() {
        assert_eq!(Spelling::Sharps.next(), Spelling::Flats);
        assert_eq!(Spelling::Flats.next(), Spelling::Sharps);
    }
}
