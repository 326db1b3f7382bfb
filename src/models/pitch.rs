//! MIDI note number to notated pitch
//!
//! Spelling always prefers sharps: the key signature estimate does not feed
//! back into enharmonic choice.

use serde::{Deserialize, Serialize};

/// Pitch as written on the staff
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotatedPitch {
    /// Note letter, 'A'..='G'
    pub step: char,
    /// Scientific octave (C4 = middle C)
    pub octave: i32,
    /// Semitone alteration; only `Some(1)` is produced
    pub alter: Option<i8>,
}

/// Chromatic spelling by pitch class, sharps preferred
const CHROMATIC_SPELLING: [(char, Option<i8>); 12] = [
    ('C', None),
    ('C', Some(1)),
    ('D', None),
    ('D', Some(1)),
    ('E', None),
    ('F', None),
    ('F', Some(1)),
    ('G', None),
    ('G', Some(1)),
    ('A', None),
    ('A', Some(1)),
    ('B', None),
];

/// Convert a MIDI note number into step, octave and optional sharp
///
/// Octave is `floor(note / 12) - 1`, so 60 is C4 and 0 is C-1. Only 0..=127
/// is meaningful MIDI, but any integer maps without error.
pub fn note_number_to_pitch(note: i32) -> NotatedPitch {
    let (step, alter) = CHROMATIC_SPELLING[note.rem_euclid(12) as usize];
    NotatedPitch {
        step,
        octave: note.div_euclid(12) - 1,
        alter,
    }
}

impl NotatedPitch {
    /// Semitone offset of the natural step above C
    #[cfg(test)]
    fn step_semitones(step: char) -> i32 {
        match step {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => 0,
        }
    }

    /// MIDI note number this pitch sounds at
    #[cfg(test)]
    fn midi_number(&self) -> i32 {
        Self::step_semitones(self.step)
            + self.alter.unwrap_or(0) as i32
            + (self.octave + 1) * 12
    }
}
