//! Matching keyboard keys against chord notes across spellings.
//!
//! The resolver spells notes the way the chord wants them (`E#` in C# major)
//! while the keyboard names its keys by a fixed convention (`F`). Membership
//! and role lookups expand a key's name into its listed equivalents and
//! compare strings.
//!
//! The table is hand-written and deliberately not closed under symmetry:
//! `D#` lists `Fbb`, but `Fbb` has no entry and only matches itself.

use serde::Serialize;

use crate::chord::Chord;

/// Spellings interchangeable with `pitch_class`, the input itself first.
///
/// Unlisted pitch classes are their own sole equivalent.
pub fn equivalents(pitch_class: &str) -> Vec<&str> {
    match table_entry(pitch_class) {
        Some(listed) => listed.to_vec(),
        None => vec![pitch_class],
    }
}

fn table_entry(pitch_class: &str) -> Option<&'static [&'static str]> {
    let listed: &'static [&'static str] = match pitch_class {
        "C"   => &["C", "Dbb", "B#"],
        "C#"  => &["C#", "Db", "B##"],
        "Db"  => &["Db", "C#", "B##"],
        "D"   => &["D", "C##", "Ebb"],
        "D#"  => &["D#", "Eb", "Fbb"],
        "Eb"  => &["Eb", "D#", "Fbb"],
        "E"   => &["E", "D##", "Fb"],
        "F"   => &["F", "E#", "Gbb"],
        "F#"  => &["F#", "Gb", "E##"],
        "Gb"  => &["Gb", "F#", "E##"],
        "G"   => &["G", "F##", "Abb"],
        "G#"  => &["G#", "Ab"],
        "Ab"  => &["Ab", "G#"],
        "A"   => &["A", "G##", "Bbb"],
        "A#"  => &["A#", "Bb", "Cbb"],
        "Bb"  => &["Bb", "A#", "Cbb"],
        "B"   => &["B", "A##", "Cb"],
        // Rarer spellings pointing back at the common ones
        "B#"  => &["B#", "C", "Dbb"],
        "B##" => &["B##", "C#", "Db"],
        "Cb"  => &["Cb", "B", "A##"],
        "Cbb" => &["Cbb", "Bb", "A#"],
        "C##" => &["C##", "D", "Ebb"],
        "Dbb" => &["Dbb", "C", "B#"],
        "D##" => &["D##", "E", "Fb"],
        "Ebb" => &["Ebb", "D", "C##"],
        "E#"  => &["E#", "F", "Gbb"],
        "Fb"  => &["Fb", "E", "D##"],
        "F##" => &["F##", "G", "Abb"],
        "Gbb" => &["Gbb", "F", "E#"],
        "G##" => &["G##", "A", "Bbb"],
        "Abb" => &["Abb", "G", "F##"],
        "A##" => &["A##", "B", "Cb"],
        "Bbb" => &["Bbb", "A", "G##"],
        _ => return None,
    };
    Some(listed)
}

/// Every pitch class with its own table entry.
pub const LISTED: [&str; 33] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
    "B#", "B##", "Cb", "Cbb", "C##", "Dbb", "D##", "Ebb", "E#", "Fb", "F##", "Gbb", "G##", "Abb",
    "A##", "Bbb",
];

/// Whether the key named `pitch_class` sounds one of `notes`.
pub fn is_in_chord<S: AsRef<str>>(pitch_class: &str, notes: &[S]) -> bool {
    equivalents(pitch_class)
        .iter()
        .any(|name| notes.iter().any(|n| n.as_ref() == *name))
}

// ── Roles ─────────────────────────────────────────────────────────────────────

/// Scale-degree role of a chord note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub label: String,
    /// Position in the root-position chord, `None` when the note is not in it.
    pub index: Option<usize>,
}

impl Role {
    pub fn unknown() -> Self {
        Self { label: "Unknown".to_string(), index: None }
    }

    pub fn is_known(&self) -> bool {
        self.index.is_some()
    }
}

/// Degree name for an interval above the root.
pub fn degree_name(interval: &str) -> Option<&'static str> {
    let name = match interval {
        "1P"  => "Root",
        "2M"  => "Second",
        "3m"  => "Minor Third",
        "3M"  => "Major Third",
        "4P"  => "Fourth",
        "5d"  => "Flat Fifth",
        "5P"  => "Fifth",
        "5A"  => "Sharp Fifth",
        "6m"  => "Minor Sixth",
        "6M"  => "Major Sixth",
        "7d"  => "Diminished Seventh",
        "7m"  => "Minor Seventh",
        "7M"  => "Major Seventh",
        "9m"  => "Flat Ninth",
        "9M"  => "Ninth",
        "9A"  => "Sharp Ninth",
        "11P" => "Eleventh",
        "11A" => "Sharp Eleventh",
        "13m" => "Flat Thirteenth",
        "13M" => "Thirteenth",
        _ => return None,
    };
    Some(name)
}

/// Role label for position `index` of `chord`.
pub fn role_label(chord: &Chord, index: usize) -> String {
    chord
        .intervals
        .get(index)
        .and_then(|iv| degree_name(iv))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Extension {}", index + 1))
}

/// Role the key named `pitch_class` plays in `chord`.
///
/// The first root-position note matching any equivalent spelling wins.
pub fn role_of(pitch_class: &str, chord: &Chord) -> Role {
    let names = equivalents(pitch_class);
    let found = chord
        .notes
        .iter()
        .position(|note| names.contains(&note.as_str()));
    match found {
        Some(index) => Role { label: role_label(chord, index), index: Some(index) },
        None => Role::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{ChordResolver, Dictionary};

    #[test]
    fn test_every_listed_spelling_is_its_own_equivalent() {
        for pc in LISTED {
            assert_eq!(equivalents(pc)[0], pc);
            assert!(table_entry(pc).is_some(), "{pc} missing from table");
        }
    }

    #[test]
    fn test_unlisted_falls_back_to_itself() {
        assert_eq!(equivalents("E##"), ["E##"]);
        assert_eq!(equivalents("nonsense"), ["nonsense"]);
    }

    #[test]
    fn test_table_asymmetry_is_preserved() {
        assert!(equivalents("D#").contains(&"Fbb"));
        assert_eq!(equivalents("Fbb"), ["Fbb"]);
        assert_eq!(equivalents("G#"), ["G#", "Ab"]);
    }

    #[test]
    fn test_membership_crosses_spellings() {
        let c_sharp_major = ["C#", "E#", "G#"];
        assert!(is_in_chord("F", &c_sharp_major));
        assert!(is_in_chord("Db", &c_sharp_major));
        assert!(is_in_chord("Ab", &c_sharp_major));
        assert!(!is_in_chord("E", &c_sharp_major));
        assert!(!is_in_chord("C#", &[] as &[&str]));
    }

    #[test]
    fn test_role_uses_root_position_index() {
        let chord = Dictionary.resolve("Cm7");
        assert_eq!(role_of("C", &chord), Role { label: "Root".into(), index: Some(0) });
        assert_eq!(role_of("D#", &chord), Role { label: "Minor Third".into(), index: Some(1) });
        assert_eq!(role_of("G", &chord), Role { label: "Fifth".into(), index: Some(2) });
        assert_eq!(role_of("A#", &chord), Role { label: "Minor Seventh".into(), index: Some(3) });
        assert_eq!(role_of("E", &chord), Role::unknown());
    }

    #[test]
    fn test_role_extension_when_no_degree_name() {
        let chord = Chord {
            symbol: "Cstub".into(),
            notes: vec!["C".into(), "E".into(), "G".into()],
            intervals: vec!["1P".into()],
            ..Chord::default()
        };
        assert_eq!(role_of("E", &chord).label, "Extension 2");
        assert_eq!(role_of("G", &chord).label, "Extension 3");
        assert_eq!(role_of("B#", &chord).label, "Root");
    }
}
