pub mod app;
pub mod chord;
pub mod config;
pub mod enharmonic;
pub mod error;
pub mod inversion;
pub mod keyboard;
pub mod pitch;
pub mod report;
pub mod ui;
pub mod view;

pub use chord::{build_chord_token, Chord, ChordResolver, Dictionary};
pub use enharmonic::{is_in_chord, role_of, Role};
pub use error::ChordError;
pub use inversion::{apply_inversion, max_inversions};
pub use keyboard::{Keyboard, PianoKey, Spelling};
pub use view::ChordView;
