//! Error types for the chord visualizer.
//!
//! Chord resolution never fails: an unknown chord symbol resolves to an
//! empty chord. Errors only come from parsing user-supplied pitch names and
//! keyboard ranges.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// A pitch class such as `C#` or `Ebb` could not be parsed.
    ///
    /// ```
    /// # use tuichords::ChordError;
    /// let err = ChordError::InvalidPitch("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid pitch class: 'H'");
    /// ```
    #[error("Invalid pitch class: '{0}'")]
    InvalidPitch(String),

    /// A note with octave such as `C4` could not be parsed.
    #[error("Invalid note '{0}': expected a pitch class followed by an octave, e.g. C4")]
    InvalidNote(String),

    /// The note falls outside the MIDI range 0..=127.
    #[error("Note '{0}' is outside the MIDI range")]
    OutOfRange(String),

    /// Keyboard start note is above the end note.
    #[error("Invalid keyboard range: {start} is above {end}")]
    InvalidRange { start: String, end: String },
}
