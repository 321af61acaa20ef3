//! Spelled pitch classes and intervals.
//!
//! Notes keep their spelling (`E#` is not `F`), so transposition moves the
//! letter and the accidental separately, the way a musician spells a chord.

use std::fmt;

use crate::error::ChordError;

// ── Letters ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::A,
        Self::B,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        }
    }

    /// Position in the C major scale (C = 0 … B = 6).
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&l| l == self).unwrap_or(0)
    }

    /// Semitones above C of the unaltered letter.
    pub fn natural_semitone(self) -> i32 {
        [0, 2, 4, 5, 7, 9, 11][self.index()]
    }

    fn step(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % 7]
    }
}

// ── Pitch class ───────────────────────────────────────────────────────────────

/// A letter plus any number of sharps (positive) or flats (negative).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PitchClass {
    pub letter: Letter,
    pub alteration: i8,
}

impl PitchClass {
    pub fn new(letter: Letter, alteration: i8) -> Self {
        Self { letter, alteration }
    }

    /// Parse a whole string as a pitch class, e.g. `"C#"`, `"Ebb"`, `"f"`.
    pub fn parse(s: &str) -> Result<Self, ChordError> {
        match Self::split_prefix(s) {
            Some((pc, "")) => Ok(pc),
            _ => Err(ChordError::InvalidPitch(s.to_string())),
        }
    }

    /// Read a pitch class off the front of `s` and return it with the rest.
    ///
    /// Accidentals are consumed greedily, so `"Bbmaj7"` splits into `Bb` and
    /// `"maj7"`.
    pub fn split_prefix(s: &str) -> Option<(Self, &str)> {
        let mut chars = s.chars();
        let letter = Letter::from_char(chars.next()?)?;
        let rest = &s[1..];
        let acc_len = rest.chars().take_while(|&c| c == '#' || c == 'b').count();
        let (acc, tail) = rest.split_at(acc_len);
        // Mixed runs like "#b" are not a spelling.
        let sharps = acc.chars().filter(|&c| c == '#').count();
        if sharps != 0 && sharps != acc.len() {
            return None;
        }
        // Runs too long for an i8 are not a spelling either.
        let count = i8::try_from(acc.len()).ok()?;
        let alteration = if sharps > 0 { count } else { -count };
        Some((Self::new(letter, alteration), tail))
    }

    /// Semitones above C, folded into one octave.
    pub fn semitone(&self) -> u8 {
        (self.letter.natural_semitone() + self.alteration as i32).rem_euclid(12) as u8
    }

    /// Spell the note `interval` above this one.
    pub fn transpose(&self, interval: Interval) -> Self {
        let target = self.letter.step(interval.number as usize - 1);
        let wanted = self.letter.natural_semitone() + self.alteration as i32 + interval.semitones();
        let mut alteration = (wanted - target.natural_semitone()).rem_euclid(12);
        if alteration > 6 {
            alteration -= 12;
        }
        Self::new(target, alteration as i8)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acc = if self.alteration >= 0 { "#" } else { "b" };
        write!(f, "{}{}", self.letter.as_char(), acc.repeat(self.alteration.unsigned_abs() as usize))
    }
}

// ── Notes with octave ─────────────────────────────────────────────────────────

/// A pitch class in a specific octave, `C4` being middle C (MIDI 60).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Note {
    pub pitch: PitchClass,
    pub octave: i8,
}

impl Note {
    pub fn parse(s: &str) -> Result<Self, ChordError> {
        let invalid = || ChordError::InvalidNote(s.to_string());
        let (pitch, octave) = PitchClass::split_prefix(s).ok_or_else(invalid)?;
        let octave: i8 = octave.parse().map_err(|_| invalid())?;
        let note = Self { pitch, octave };
        if note.midi().is_none() {
            return Err(ChordError::OutOfRange(s.to_string()));
        }
        Ok(note)
    }

    pub fn midi(&self) -> Option<u8> {
        let n = (self.octave as i32 + 1) * 12
            + self.pitch.letter.natural_semitone()
            + self.pitch.alteration as i32;
        u8::try_from(n).ok().filter(|&n| n <= 127)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

/// Drop the octave from a key name: `"C#4"` → `"C#"`, `"B-1"` → `"B"`.
pub fn strip_octave(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit() || c == '-')
}

// ── Intervals ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented(u8),
    Diminished(u8),
}

/// A spelled interval in number+quality notation: `3M`, `5d`, `11A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub number: u8,
    pub quality: Quality,
}

impl Interval {
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
        let (number, quality) = s.split_at(digits);
        let number: u8 = number.parse().ok().filter(|&n| n >= 1)?;
        let perfect = Self::is_perfect_class(number);
        let run = |c: char| (quality.chars().all(|q| q == c)).then(|| quality.len() as u8);
        let quality = match quality {
            "P" if perfect => Quality::Perfect,
            "M" if !perfect => Quality::Major,
            "m" if !perfect => Quality::Minor,
            q if q.starts_with('A') => Quality::Augmented(run('A')?),
            q if q.starts_with('d') => Quality::Diminished(run('d')?),
            _ => return None,
        };
        Some(Self { number, quality })
    }

    fn is_perfect_class(number: u8) -> bool {
        matches!((number - 1) % 7, 0 | 3 | 4)
    }

    pub fn semitones(&self) -> i32 {
        let simple = (self.number as i32 - 1) % 7;
        let base = [0, 2, 4, 5, 7, 9, 11][simple as usize] + 12 * ((self.number as i32 - 1) / 7);
        let perfect = Self::is_perfect_class(self.number);
        base + match self.quality {
            Quality::Perfect | Quality::Major => 0,
            Quality::Minor => -1,
            Quality::Augmented(n) => n as i32,
            Quality::Diminished(n) if perfect => -(n as i32),
            Quality::Diminished(n) => -(n as i32) - 1,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quality = match self.quality {
            Quality::Perfect => "P".to_string(),
            Quality::Major => "M".to_string(),
            Quality::Minor => "m".to_string(),
            Quality::Augmented(n) => "A".repeat(n as usize),
            Quality::Diminished(n) => "d".repeat(n as usize),
        };
        write!(f, "{}{}", self.number, quality)
    }
}
