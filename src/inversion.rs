//! Chord inversions: rotating a root-position chord so another note is lowest.

/// Move the first `inversion` notes to the end.
///
/// Counts past the chord size wrap around (`inversion mod len`). An empty
/// chord is returned as is.
///
/// ```
/// use tuichords::inversion::apply_inversion;
///
/// assert_eq!(apply_inversion(&["C", "E", "G"], 1), ["E", "G", "C"]);
/// assert_eq!(apply_inversion(&["C", "E", "G"], 4), ["E", "G", "C"]);
/// ```
pub fn apply_inversion<T: Clone>(notes: &[T], inversion: usize) -> Vec<T> {
    let mut out = notes.to_vec();
    if !out.is_empty() {
        out.rotate_left(effective_inversion(notes.len(), inversion));
    }
    out
}

/// The inversion actually applied to a chord of `len` notes.
pub fn effective_inversion(len: usize, inversion: usize) -> usize {
    if len == 0 { 0 } else { inversion % len }
}

/// Highest inversion a chord of `len` notes has, `None` for an empty chord.
pub fn max_inversions(len: usize) -> Option<usize> {
    len.checked_sub(1)
}

/// `1` → `"1st"`, `2` → `"2nd"`, `3` → `"3rd"`, anything else → `"Nth"`.
pub fn ordinal(n: usize) -> String {
    let suffix = match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
