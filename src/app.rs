use tracing::debug;

use crate::chord::{chord_type_choices, ChordResolver, ROOT_CHOICES};
use crate::config::Settings;
use crate::keyboard::Keyboard;
use crate::view::ChordView;

// ── Focus ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Root note selector.
    Root,
    /// Chord type selector.
    Type,
    /// Inversion selector.
    Inversion,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Root      => Self::Type,
            Self::Type      => Self::Inversion,
            Self::Inversion => Self::Root,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Root      => Self::Inversion,
            Self::Type      => Self::Root,
            Self::Inversion => Self::Type,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Root      => "Root",
            Self::Type      => "Type",
            Self::Inversion => "Inversion",
        }
    }
}

/// Step `current` by `delta` through `len` choices, wrapping. An unlisted
/// current value starts from the first choice.
fn cycle(current: Option<usize>, len: usize, delta: isize) -> usize {
    match current {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

pub struct App {
    resolver: Box<dyn ChordResolver>,
    pub keyboard:    Keyboard,
    pub view:        ChordView,
    pub focus:       Focus,
    pub should_quit: bool,
    pub status_msg:  String,
}

impl App {
    pub fn new(resolver: Box<dyn ChordResolver>, settings: Settings) -> Self {
        let view = ChordView::new(resolver.as_ref(), &settings.root, &settings.chord_type, settings.inversion);
        Self {
            resolver,
            keyboard:    settings.keyboard,
            view,
            focus:       Focus::Root,
            should_quit: false,
            status_msg:  String::new(),
        }
    }

    pub fn root(&self) -> &str { &self.view.root }

    pub fn chord_type(&self) -> &str { &self.view.chord_type }

    pub fn inversion(&self) -> usize { self.view.inversion }

    // ── Selection setters ─────────────────────────────────────────────────

    pub fn set_root(&mut self, root: &str) {
        let chord_type = self.view.chord_type.clone();
        self.reload(root, &chord_type);
    }

    /// Changing the type keeps the inversion; a stale one wraps around.
    pub fn set_chord_type(&mut self, chord_type: &str) {
        let root = self.view.root.clone();
        self.reload(&root, chord_type);
    }

    /// Only re-rotates the current chord.
    pub fn set_inversion(&mut self, inversion: usize) {
        self.view.set_inversion(inversion);
        debug!(inversion, effective = self.view.effective_inversion, "inversion changed");
        self.status_msg = format!("Chord: {}", self.view.title());
    }

    fn reload(&mut self, root: &str, chord_type: &str) {
        self.view = ChordView::new(self.resolver.as_ref(), root, chord_type, self.view.inversion);
        debug!(root, chord_type, notes = ?self.view.chord.notes, "chord changed");
        self.status_msg = if self.view.chord.is_empty() {
            format!("Unknown chord: {}", self.view.chord.symbol)
        } else {
            format!("Chord: {}", self.view.title())
        };
    }

    // ── Focus & navigation ────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.status_msg = format!("Focus: {}", self.focus.name());
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.status_msg = format!("Focus: {}", self.focus.name());
    }

    pub fn select_left(&mut self)  { self.step_selection(-1); }

    pub fn select_right(&mut self) { self.step_selection(1); }

    fn step_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Root => {
                let current = ROOT_CHOICES.iter().position(|&r| r == self.root());
                let root = ROOT_CHOICES[cycle(current, ROOT_CHOICES.len(), delta)];
                self.set_root(root);
            }
            Focus::Type => {
                let types: Vec<&str> = chord_type_choices().collect();
                let current = types.iter().position(|&t| t == self.chord_type());
                let chord_type = types[cycle(current, types.len(), delta)];
                self.set_chord_type(chord_type);
            }
            Focus::Inversion => {
                let len = self.view.chord.len();
                if len == 0 { return; }
                let current = Some(self.view.effective_inversion);
                self.set_inversion(cycle(current, len, delta));
            }
        }
    }

    /// Digit shortcut; ignored when the chord has no such inversion.
    pub fn select_inversion_digit(&mut self, digit: char) {
        let Some(n) = digit.to_digit(10) else { return };
        match self.view.max_inversions {
            Some(max) if n as usize <= max => self.set_inversion(n as usize),
            _ => self.status_msg = format!("No inversion {} for {}", n, self.view.title()),
        }
    }

    pub fn toggle_spelling(&mut self) {
        self.keyboard.spelling = self.keyboard.spelling.next();
        self.status_msg = format!("Key names: {}", self.keyboard.spelling.name());
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── UI read helpers ───────────────────────────────────────────────────

    /// Number of inversion buttons: one per chord note, none for an empty chord.
    pub fn inversion_count(&self) -> usize {
        self.view.max_inversions.map_or(0, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::chord::{Chord, Dictionary};

    /// Counts how often the resolver is asked.
    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl ChordResolver for Counting {
        fn resolve(&self, symbol: &str) -> Chord {
            self.calls.set(self.calls.get() + 1);
            Dictionary.resolve(symbol)
        }
    }

    fn app() -> App {
        App::new(Box::new(Dictionary), Settings::default())
    }

    #[test]
    fn test_starts_on_c_major() {
        let app = app();
        assert_eq!(app.view.chord.notes, ["C", "E", "G"]);
        assert_eq!(app.focus, Focus::Root);
        assert_eq!(app.inversion_count(), 3);
    }

    #[test]
    fn test_inversion_change_does_not_resolve_again() {
        let calls = Rc::new(Cell::new(0));
        let mut app = App::new(Box::new(Counting { calls: Rc::clone(&calls) }), Settings::default());
        assert_eq!(calls.get(), 1);

        app.set_inversion(2);
        app.select_inversion_digit('1');
        assert_eq!(calls.get(), 1);
        assert_eq!(app.view.inverted, ["E", "G", "C"]);

        app.set_chord_type("maj7");
        app.set_root("D");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_type_change_keeps_stale_inversion() {
        let mut app = app();
        app.set_chord_type("maj7");
        app.set_inversion(3);
        app.set_chord_type("major");
        assert_eq!(app.inversion(), 3);
        assert_eq!(app.view.effective_inversion, 0);
        assert_eq!(app.view.inverted, ["C", "E", "G"]);
    }

    #[test]
    fn test_root_selection_wraps() {
        let mut app = app();
        app.select_left();
        assert_eq!(app.root(), "B");
        app.select_right();
        app.select_right();
        assert_eq!(app.root(), "C#");
        assert_eq!(app.view.chord.notes, ["C#", "E#", "G#"]);
    }

    #[test]
    fn test_type_selection_walks_groups() {
        let mut app = app();
        app.focus_next();
        assert_eq!(app.focus, Focus::Type);
        for _ in 0..6 { app.select_right(); }
        assert_eq!(app.chord_type(), "7");
        app.select_left();
        assert_eq!(app.chord_type(), "sus2");
    }

    #[test]
    fn test_inversion_selection_wraps() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.focus, Focus::Inversion);
        app.select_left();
        assert_eq!(app.inversion(), 2);
        app.select_right();
        assert_eq!(app.inversion(), 0);
    }

    #[test]
    fn test_digit_beyond_chord_is_ignored() {
        let mut app = app();
        app.select_inversion_digit('3');
        assert_eq!(app.inversion(), 0);
        assert!(app.status_msg.starts_with("No inversion 3"));
        app.select_inversion_digit('x');
        assert_eq!(app.inversion(), 0);
    }

    #[test]
    fn test_unknown_type_offers_no_inversions() {
        let mut app = app();
        app.set_chord_type("bogus");
        assert_eq!(app.inversion_count(), 0);
        assert_eq!(app.status_msg, "Unknown chord: Cbogus");
        app.focus = Focus::Inversion;
        app.select_right();
        assert_eq!(app.inversion(), 0);
        // Stepping from an unlisted type starts over at the first choice.
        app.focus = Focus::Type;
        app.select_right();
        assert_eq!(app.chord_type(), "major");
    }

    #[test]
    fn test_toggle_spelling_and_quit() {
        let mut app = app();
        app.toggle_spelling();
        assert_eq!(app.status_msg, "Key names: Flats");
        app.quit();
        assert!(app.should_quit);
    }
}
