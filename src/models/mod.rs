//! Models module for the MIDI to MusicXML converter
//!
//! This module contains the data types that flow through the conversion:
//! the decoded MIDI input, reconstructed notes, and the notation attributes
//! written into each part.

pub mod instruments;
pub mod midi;
pub mod note;
pub mod pitch;
pub mod signature;

// Re-export commonly used types
pub use instruments::{instrument_name, DEFAULT_PROGRAM};
pub use midi::{EventKind, EventType, MidiFile, MidiHeader, RawEvent, Track};
pub use note::{Chord, Note, PeriodChord, TimePeriod};
pub use pitch::{note_number_to_pitch, NotatedPitch};
pub use signature::{Clef, KeySignature, Mode, NoteType, Tempo, TimeSignature};
