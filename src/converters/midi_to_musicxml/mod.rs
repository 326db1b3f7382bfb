//! MIDI to MusicXML converter
//!
//! Turns a decoded MIDI event stream into a MusicXML 4.0 `score-partwise`
//! document with one part per non-empty track.
//!
//! # Pipeline
//!
//! 1. **Extract**: rebuild note intervals per track (`extract`)
//! 2. **Estimate**: pick a key from all pitch classes unless the file names one (`key_signature`)
//! 3. **Group**: tile each track with chord/rest periods (`grouping`)
//! 4. **Write**: cut periods at barlines and emit measures (`crate::renderers::musicxml`)
//!
//! # Basic Usage
//!
//! ```ignore
//! use midi2xml_wasm::converters::midi_to_musicxml::midi_to_musicxml;
//!
//! let xml = midi_to_musicxml(&midi_file, Some("Etude"))?;
//! ```

pub mod document;
pub mod errors;
pub mod extract;
pub mod grouping;
pub mod key_signature;
pub mod settings;


pub use document::{plan_score, render_score, PartPlan, ScorePlan};
pub use errors::{ConversionError, Result};
pub use extract::{extract_notes, DocumentContext, TrackNotes};
pub use grouping::group_notes_by_time_period;
pub use key_signature::estimate_key_signature;
pub use settings::{ConversionSettings, DEFAULT_TEMPO_BPM, DEFAULT_TITLE};

use crate::models::MidiFile;

/// Convert a decoded MIDI file to a MusicXML string
///
/// # Arguments
/// * `midi` - Decoded header and tracks
/// * `title` - `<work-title>`; "Generated" when `None`
pub fn midi_to_musicxml(midi: &MidiFile, title: Option<&str>) -> Result<String> {
    midi_to_musicxml_with_settings(midi, &ConversionSettings::with_title(title))
}

/// Convert a decoded MIDI file with explicit settings
pub fn midi_to_musicxml_with_settings(midi: &MidiFile, settings: &ConversionSettings) -> Result<String> {
    let plan = plan_score(midi, settings)?;
    render_score(&plan, settings)
}
