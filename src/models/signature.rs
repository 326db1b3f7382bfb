//! Meter, key, tempo and clef attributes shared by every part

use serde::{Deserialize, Serialize};

/// Time signature, e.g. 3/4
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// MusicXML `<mode>` text
    pub fn xml_name(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// Key signature as a circle-of-fifths position (-7 flats to +7 sharps)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySignature {
    pub mode: Mode,
    pub fifths: i8,
}

impl KeySignature {
    pub fn new(mode: Mode, fifths: i8) -> Self {
        Self { mode, fifths }
    }

    /// From a MIDI key signature meta event (`scale` 0 = major)
    pub fn from_meta(key: i8, scale: u8) -> Self {
        Self {
            mode: if scale == 0 { Mode::Major } else { Mode::Minor },
            fifths: key,
        }
    }
}

/// MusicXML note type names, used for the metronome beat unit
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteType {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
    OneHundredTwentyEighth,
}

impl NoteType {
    /// Note type named by a time-signature denominator; quarter when the
    /// denominator is not a power of two in range
    pub fn from_denominator(denominator: u32) -> Self {
        match denominator {
            1 => NoteType::Whole,
            2 => NoteType::Half,
            4 => NoteType::Quarter,
            8 => NoteType::Eighth,
            16 => NoteType::Sixteenth,
            32 => NoteType::ThirtySecond,
            64 => NoteType::SixtyFourth,
            128 => NoteType::OneHundredTwentyEighth,
            _ => NoteType::Quarter,
        }
    }

    pub fn xml_name(&self) -> &'static str {
        match self {
            NoteType::Whole => "whole",
            NoteType::Half => "half",
            NoteType::Quarter => "quarter",
            NoteType::Eighth => "eighth",
            NoteType::Sixteenth => "16th",
            NoteType::ThirtySecond => "32nd",
            NoteType::SixtyFourth => "64th",
            NoteType::OneHundredTwentyEighth => "128th",
        }
    }
}

/// Metronome marking
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tempo {
    pub beat_unit: NoteType,
    pub beats_per_minute: u32,
}

impl Tempo {
    pub fn new(beat_unit: NoteType, beats_per_minute: u32) -> Self {
        Self {
            beat_unit,
            beats_per_minute,
        }
    }

    /// Beats per minute from a setTempo meta value, rounded to nearest
    pub fn bpm_from_microseconds(microseconds_per_beat: u32) -> u32 {
        if microseconds_per_beat == 0 {
            return 0;
        }
        (60_000_000.0 / microseconds_per_beat as f64).round() as u32
    }
}

/// Clef sign plus staff line
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clef {
    Treble,
    Bass,
}

impl Clef {
    pub fn sign(&self) -> &'static str {
        match self {
            Clef::Treble => "G",
            Clef::Bass => "F",
        }
    }

    pub fn line(&self) -> u8 {
        match self {
            Clef::Treble => 2,
            Clef::Bass => 4,
        }
    }
}
