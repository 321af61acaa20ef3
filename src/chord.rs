//! Chord symbols and chord resolution.
//!
//! A chord symbol is a root followed by a chord-type suffix (`C`, `Ebm7`,
//! `F#add9`). The [`Dictionary`] resolver spells the chord by transposing the
//! root through the type's intervals. Unknown symbols resolve to an empty
//! chord rather than an error.

use serde::Serialize;
use tracing::{debug, warn};

use crate::pitch::{Interval, PitchClass};

// ── Chord-type dictionary ─────────────────────────────────────────────────────

/// One entry of the chord-type dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordType {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Space separated, e.g. `"1P 3M 5P"`.
    pub intervals: &'static str,
}

impl ChordType {
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.intervals.split_whitespace().filter_map(Interval::parse)
    }

    pub fn matches(&self, suffix: &str) -> bool {
        self.name == suffix || self.aliases.contains(&suffix)
    }
}

const fn ct(
    name: &'static str,
    aliases: &'static [&'static str],
    intervals: &'static str,
) -> ChordType {
    ChordType { name, aliases, intervals }
}

pub const CHORD_TYPES: &[ChordType] = &[
    // Triads
    ct("major", &["", "M", "maj", "^"], "1P 3M 5P"),
    ct("minor", &["m", "min", "-"], "1P 3m 5P"),
    ct("diminished", &["dim", "°", "o"], "1P 3m 5d"),
    ct("augmented", &["aug", "+", "+5"], "1P 3M 5A"),
    ct("minor augmented", &["m#5", "m+", "-#5"], "1P 3m 5A"),
    ct("suspended fourth", &["sus4", "sus"], "1P 4P 5P"),
    ct("suspended second", &["sus2"], "1P 2M 5P"),
    ct("fifth", &["5"], "1P 5P"),
    // Sevenths
    ct("dominant seventh", &["7", "dom"], "1P 3M 5P 7m"),
    ct("major seventh", &["maj7", "M7", "ma7", "Maj7", "^7", "Δ"], "1P 3M 5P 7M"),
    ct("minor seventh", &["m7", "min7", "mi7", "-7"], "1P 3m 5P 7m"),
    ct("minor/major seventh", &["mMaj7", "mM7", "m/maj7", "-maj7"], "1P 3m 5P 7M"),
    ct("diminished seventh", &["dim7", "°7", "o7"], "1P 3m 5d 7d"),
    ct("half-diminished", &["m7b5", "ø", "h7", "-7b5"], "1P 3m 5d 7m"),
    ct("augmented seventh", &["aug7", "7#5", "+7", "7+", "7aug"], "1P 3M 5A 7m"),
    ct("augmented major seventh", &["maj7#5", "maj7+5", "+maj7"], "1P 3M 5A 7M"),
    ct("suspended fourth seventh", &["7sus4", "7sus"], "1P 4P 5P 7m"),
    ct("lydian dominant seventh", &["7#11", "7#4"], "1P 3M 5P 7m 11A"),
    ct("dominant flat ninth", &["7b9"], "1P 3M 5P 7m 9m"),
    ct("dominant sharp ninth", &["7#9"], "1P 3M 5P 7m 9A"),
    ct("dominant flat fifth", &["7b5"], "1P 3M 5d 7m"),
    // Extended
    ct("dominant ninth", &["9"], "1P 3M 5P 7m 9M"),
    ct("major ninth", &["maj9", "M9", "^9"], "1P 3M 5P 7M 9M"),
    ct("minor ninth", &["m9", "min9", "-9"], "1P 3m 5P 7m 9M"),
    ct("eleventh", &["11"], "1P 5P 7m 9M 11P"),
    ct("minor eleventh", &["m11", "min11", "-11"], "1P 3m 5P 7m 9M 11P"),
    ct("major sharp eleventh", &["maj9#11", "maj7#11"], "1P 3M 5P 7M 9M 11A"),
    ct("dominant thirteenth", &["13"], "1P 3M 5P 7m 9M 13M"),
    ct("major thirteenth", &["maj13", "M13", "^13"], "1P 3M 5P 7M 9M 13M"),
    ct("minor thirteenth", &["m13", "min13", "-13"], "1P 3m 5P 7m 9M 13M"),
    ct("dominant flat thirteenth", &["7b13"], "1P 3M 7m 13m"),
    ct("sixth", &["6", "add6", "add13", "M6"], "1P 3M 5P 6M"),
    ct("minor sixth", &["m6", "min6", "-6"], "1P 3m 5P 6M"),
    ct("sixth added ninth", &["69", "6/9", "6add9", "M69"], "1P 3M 5P 6M 9M"),
    ct("minor sixth added ninth", &["m69", "m6/9", "-69"], "1P 3m 5P 6M 9M"),
    // Added tone
    ct("major added ninth", &["add9", "add2", "2"], "1P 3M 5P 9M"),
    ct("minor added ninth", &["madd9", "madd2", "-add9"], "1P 3m 5P 9M"),
    ct("suspended second fourth", &["sus24", "sus4add9"], "1P 2M 4P 5P"),
];

/// Look up a chord type by name or alias.
pub fn chord_type(suffix: &str) -> Option<&'static ChordType> {
    CHORD_TYPES.iter().find(|t| t.matches(suffix))
}

// ── Selector catalogue ────────────────────────────────────────────────────────

pub const ROOT_CHOICES: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

/// Colour groups for the chord-type buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordGroup {
    Triad,
    Seventh,
    Extended,
    AddedTone,
}

impl ChordGroup {
    pub const ALL: [ChordGroup; 4] = [
        Self::Triad,
        Self::Seventh,
        Self::Extended,
        Self::AddedTone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Triad     => "Triads",
            Self::Seventh   => "Sevenths",
            Self::Extended  => "Extended",
            Self::AddedTone => "Added tone",
        }
    }

    /// Chord-type identifiers offered in this group, in button order.
    pub fn types(self) -> &'static [&'static str] {
        match self {
            Self::Triad     => &["major", "minor", "dim", "aug", "sus4", "sus2"],
            Self::Seventh   => &["7", "maj7", "m7", "dim7", "aug7", "7sus4"],
            Self::Extended  => &["9", "maj9", "m9", "6", "m6", "69", "m69"],
            Self::AddedTone => &["add9", "madd9"],
        }
    }

    pub fn of(chord_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.types().contains(&chord_type))
    }
}

/// Every chord-type identifier offered by the selector, group by group.
pub fn chord_type_choices() -> impl Iterator<Item = &'static str> {
    ChordGroup::ALL.into_iter().flat_map(|g| g.types().iter().copied())
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Build the symbol handed to the resolver: root and type, concatenated.
pub fn build_chord_token(root: &str, chord_type: &str) -> String {
    format!("{root}{chord_type}")
}

/// A chord in root position. Empty when the symbol could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub symbol: String,
    pub root: Option<String>,
    pub type_name: Option<String>,
    /// Spelled pitch classes; index 0 is the root.
    pub notes: Vec<String>,
    /// Interval of each note above the root, parallel to `notes`.
    pub intervals: Vec<String>,
}

impl Chord {
    pub fn empty(symbol: &str) -> Self {
        Self { symbol: symbol.to_string(), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }
}

/// Turns a chord symbol into its root-position notes.
pub trait ChordResolver {
    fn resolve(&self, symbol: &str) -> Chord;
}

/// The built-in resolver backed by [`CHORD_TYPES`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Dictionary;

impl ChordResolver for Dictionary {
    fn resolve(&self, symbol: &str) -> Chord {
        let Some((root, suffix)) = PitchClass::split_prefix(symbol) else {
            warn!(symbol, "chord symbol has no root");
            return Chord::empty(symbol);
        };
        let Some(kind) = chord_type(suffix) else {
            warn!(symbol, suffix, "unknown chord type");
            return Chord::empty(symbol);
        };

        let (notes, intervals): (Vec<String>, Vec<String>) = kind
            .intervals()
            .map(|iv| (root.transpose(iv).to_string(), iv.to_string()))
            .unzip();
        let chord = Chord {
            symbol: symbol.to_string(),
            root: Some(root.to_string()),
            type_name: Some(kind.name.to_string()),
            notes,
            intervals,
        };
        debug!(symbol, notes = ?chord.notes, "resolved chord");
        chord
    }
}

/// Resolve `root` + `chord_type` through `resolver`.
pub fn resolve_chord(resolver: &dyn ChordResolver, root: &str, chord_type: &str) -> Chord {
    resolver.resolve(&build_chord_token(root, chord_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(symbol: &str) -> Vec<String> {
        Dictionary.resolve(symbol).notes
    }

    #[test]
    fn test_build_chord_token() {
        assert_eq!(build_chord_token("C", "major"), "Cmajor");
        assert_eq!(build_chord_token("Eb", "maj7"), "Ebmaj7");
        assert_eq!(build_chord_token("F#", "add9"), "F#add9");
        assert_eq!(build_chord_token("Bb", "madd9"), "Bbmadd9");
    }

    #[test]
    fn test_dictionary_intervals_all_parse() {
        for kind in CHORD_TYPES {
            let parsed = kind.intervals().count();
            let written = kind.intervals.split_whitespace().count();
            assert_eq!(parsed, written, "bad interval in {}", kind.name);
        }
    }

    #[test]
    fn test_every_offered_type_resolves() {
        for root in ROOT_CHOICES {
            for kind in chord_type_choices() {
                let chord = resolve_chord(&Dictionary, root, kind);
                assert!(!chord.is_empty(), "{root}{kind} did not resolve");
                assert_eq!(chord.notes[0], root);
                assert_eq!(chord.notes.len(), chord.intervals.len());
            }
        }
    }

    #[test]
    fn test_triads() {
        assert_eq!(notes("Cmajor"), ["C", "E", "G"]);
        assert_eq!(notes("C"), ["C", "E", "G"]);
        assert_eq!(notes("Aminor"), ["A", "C", "E"]);
        assert_eq!(notes("Dbmajor"), ["Db", "F", "Ab"]);
        assert_eq!(notes("Bdim"), ["B", "D", "F"]);
        assert_eq!(notes("C#aug"), ["C#", "E#", "G##"]);
        assert_eq!(notes("Gsus4"), ["G", "C", "D"]);
        assert_eq!(notes("Dsus2"), ["D", "E", "A"]);
    }

    #[test]
    fn test_sevenths_and_extensions() {
        assert_eq!(notes("G7"), ["G", "B", "D", "F"]);
        assert_eq!(notes("Cmaj7"), ["C", "E", "G", "B"]);
        assert_eq!(notes("Cdim7"), ["C", "Eb", "Gb", "Bbb"]);
        assert_eq!(notes("Caug7"), ["C", "E", "G#", "Bb"]);
        assert_eq!(notes("D9"), ["D", "F#", "A", "C", "E"]);
        assert_eq!(notes("C69"), ["C", "E", "G", "A", "D"]);
        assert_eq!(notes("Am69"), ["A", "C", "E", "F#", "B"]);
        assert_eq!(notes("Cadd9"), ["C", "E", "G", "D"]);
        assert_eq!(notes("Cmadd9"), ["C", "Eb", "G", "D"]);
    }

    #[test]
    fn test_unknown_symbols_resolve_empty() {
        let chord = Dictionary.resolve("Cbogus");
        assert!(chord.is_empty());
        assert_eq!(chord.symbol, "Cbogus");
        assert!(chord.intervals.is_empty());

        assert!(Dictionary.resolve("").is_empty());
        assert!(Dictionary.resolve("Hmajor").is_empty());
        assert!(Dictionary.resolve("major").is_empty());
    }

    #[test]
    fn test_overlong_accidental_runs_resolve_empty() {
        let flats = format!("C{}major", "b".repeat(128));
        let chord = Dictionary.resolve(&flats);
        assert!(chord.is_empty());
        assert_eq!(chord.symbol, flats);

        let sharps = format!("C{}major", "#".repeat(130));
        let chord = Dictionary.resolve(&sharps);
        assert!(chord.is_empty());
        assert_eq!(chord.root, None);
    }

    #[test]
    fn test_groups() {
        assert_eq!(ChordGroup::of("major"), Some(ChordGroup::Triad));
        assert_eq!(ChordGroup::of("7sus4"), Some(ChordGroup::Seventh));
        assert_eq!(ChordGroup::of("m69"), Some(ChordGroup::Extended));
        assert_eq!(ChordGroup::of("madd9"), Some(ChordGroup::AddedTone));
        assert_eq!(ChordGroup::of("bogus"), None);
        assert_eq!(chord_type_choices().count(), 21);
    }
}
