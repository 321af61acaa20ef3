//! Everything one render pass needs, derived from the three selections.

use serde::Serialize;

use crate::chord::{resolve_chord, Chord, ChordResolver};
use crate::enharmonic::{self, Role};
use crate::inversion::{apply_inversion, effective_inversion, max_inversions, ordinal};
use crate::keyboard::{Keyboard, PianoKey};
use crate::pitch::strip_octave;

/// A chord note shown under the keyboard, in inverted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub note: String,
    #[serde(flatten)]
    pub role: Role,
}

/// How one keyboard key is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPaint {
    pub key: String,
    pub accidental: bool,
    /// Root-position index of the chord note this key sounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordView {
    pub root: String,
    pub chord_type: String,
    /// Inversion as selected, possibly stale for the current chord.
    pub inversion: usize,
    pub effective_inversion: usize,
    pub max_inversions: Option<usize>,
    pub chord: Chord,
    pub inverted: Vec<String>,
    pub legend: Vec<LegendEntry>,
}

impl ChordView {
    pub fn new(resolver: &dyn ChordResolver, root: &str, chord_type: &str, inversion: usize) -> Self {
        let chord = resolve_chord(resolver, root, chord_type);
        Self::from_chord(root, chord_type, chord, inversion)
    }

    pub fn from_chord(root: &str, chord_type: &str, chord: Chord, inversion: usize) -> Self {
        let mut view = Self {
            root: root.to_string(),
            chord_type: chord_type.to_string(),
            inversion,
            effective_inversion: 0,
            max_inversions: max_inversions(chord.len()),
            chord,
            inverted: Vec::new(),
            legend: Vec::new(),
        };
        view.set_inversion(inversion);
        view
    }

    /// Re-rotate for a new inversion. The chord itself is kept.
    pub fn set_inversion(&mut self, inversion: usize) {
        self.inversion = inversion;
        self.effective_inversion = effective_inversion(self.chord.len(), inversion);
        self.inverted = apply_inversion(&self.chord.notes, inversion);
        self.legend = self
            .inverted
            .iter()
            .map(|note| LegendEntry { note: note.clone(), role: enharmonic::role_of(note, &self.chord) })
            .collect();
    }

    /// `"Cmaj7"`, or `"Cmaj7 (2nd inversion)"`.
    pub fn title(&self) -> String {
        let base = format!("{}{}", self.root, self.chord_type);
        match self.effective_inversion {
            0 => base,
            n => format!("{base} ({} inversion)", ordinal(n)),
        }
    }

    pub fn is_in_chord(&self, pitch_class: &str) -> bool {
        enharmonic::is_in_chord(pitch_class, &self.inverted)
    }

    pub fn role_of(&self, pitch_class: &str) -> Role {
        enharmonic::role_of(pitch_class, &self.chord)
    }

    /// Root-position index for a key name with octave (`"B#4"`), if the key
    /// belongs to the chord.
    pub fn highlight(&self, key_name: &str) -> Option<usize> {
        let pitch_class = strip_octave(key_name);
        if !self.is_in_chord(pitch_class) {
            return None;
        }
        self.role_of(pitch_class).index
    }

    pub fn paint(&self, key: &PianoKey) -> KeyPaint {
        let role = self.is_in_chord(key.pitch_class).then(|| self.role_of(key.pitch_class));
        let role = role.filter(Role::is_known);
        KeyPaint {
            key: key.to_string(),
            accidental: key.accidental,
            position: role.as_ref().and_then(|r| r.index),
            role: role.map(|r| r.label),
        }
    }

    pub fn paint_keys(&self, keyboard: &Keyboard) -> Vec<KeyPaint> {
        keyboard.render_keys(|key| self.paint(key))
    }
}
