//! Format converters
//!
//! This module contains the MIDI decoding adapter and the MIDI to MusicXML
//! conversion pipeline.

pub mod midi_to_musicxml;
pub mod smf;

// Re-export for convenience
pub use midi_to_musicxml::{
    midi_to_musicxml,
    midi_to_musicxml_with_settings,
    ConversionError,
    ConversionSettings,
};
pub use smf::{parse_smf, SmfError};

/// Decode Standard MIDI File bytes and convert them to MusicXML
pub fn smf_to_musicxml(bytes: &[u8], settings: &ConversionSettings) -> Result<String, ConversionError> {
    let midi = parse_smf(bytes)?;
    midi_to_musicxml_with_settings(&midi, settings)
}
