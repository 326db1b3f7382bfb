//! Note intervals, time periods and chords
//!
//! A [`Note`] is one reconstructed sounding interval. The grouper turns a
//! track's notes into contiguous [`TimePeriod`]s, each paired with the
//! [`Chord`] that sounds throughout it (an empty chord is a rest).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::pitch::{note_number_to_pitch, NotatedPitch};

/// A single note interval reconstructed from noteOn/noteOff events
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MIDI note number (60 = C4)
    pub pitch: u8,
    pub start_tick: u64,
    /// `None` while the note is still open
    pub end_tick: Option<u64>,
    pub velocity: u8,
    /// Retriggers absorbed while the note was open
    pub conflict_depth: u32,
}

impl Note {
    /// Open a note at `start_tick`
    pub fn open(pitch: u8, start_tick: u64, velocity: u8) -> Self {
        Self {
            pitch,
            start_tick,
            end_tick: None,
            velocity,
            conflict_depth: 0,
        }
    }

    /// A closed note, mostly for tests and fixtures
    pub fn closed(pitch: u8, start_tick: u64, end_tick: u64) -> Self {
        Self {
            pitch,
            start_tick,
            end_tick: Some(end_tick),
            velocity: 64,
            conflict_depth: 0,
        }
    }

    #[cfg(test)]
    fn is_open(&self) -> bool {
        self.end_tick.is_none()
    }

    /// Duration in ticks; zero while open
    pub fn duration(&self) -> u64 {
        self.end_tick
            .map(|end| end.saturating_sub(self.start_tick))
            .unwrap_or(0)
    }
}

/// Half-open tick interval `[start_tick, end_tick)`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub start_tick: u64,
    pub end_tick: u64,
}

impl TimePeriod {
    pub fn new(start_tick: u64, end_tick: u64) -> Self {
        Self { start_tick, end_tick }
    }

    pub fn duration(&self) -> u64 {
        self.end_tick - self.start_tick
    }
}

/// Set of MIDI pitches sounding together; empty means rest
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Chord {
    pub pitches: BTreeSet<u8>,
}

impl Chord {
    pub fn rest() -> Self {
        Self::default()
    }

    pub fn from_pitches<I: IntoIterator<Item = u8>>(pitches: I) -> Self {
        Self {
            pitches: pitches.into_iter().collect(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Notated pitches, lowest first
    pub fn notated_pitches(&self) -> Vec<NotatedPitch> {
        self.pitches
            .iter()
            .map(|&pitch| note_number_to_pitch(pitch as i32))
            .collect()
    }
}

/// A period paired with what sounds during it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChord {
    pub period: TimePeriod,
    pub chord: Chord,
}

impl PeriodChord {
    pub fn new(period: TimePeriod, chord: Chord) -> Self {
        Self { period, chord }
    }

    pub fn duration(&self) -> u64 {
        self.period.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_duration() {
        let mut note = Note::open(60, 100, 80);
        assert!(note.is_open());
        assert_eq!(note.duration(), 0);

        note.end_tick = Some(580);
        assert!(!note.is_open());
        assert_eq!(note.duration(), 480);
    }

    #[test]
    fn test_chord_pitches_are_sorted_and_distinct() {
        let chord = Chord::from_pitches([67, 60, 64, 60]);
        assert_eq!(chord.pitches.len(), 3);

        let steps: Vec<_> = chord.notated_pitches().iter().map(|p| p.step).collect();
        assert_eq!(steps, vec!['C', 'E', 'G']);
    }

    #[test]
    fn test_rest() {
        assert!(Chord::rest().is_rest());
        assert!(Chord::rest().notated_pitches().is_empty());
    }
}
