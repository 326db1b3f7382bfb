//! Conversion exports for the WASM API
//!
//! - MIDI bytes → MusicXML
//! - Decoded event JSON (from a JavaScript MIDI decoder) → MusicXML
//! - MIDI bytes → decoded event JSON, for inspection/debugging

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, to_js_error};
use crate::converters::midi_to_musicxml::{midi_to_musicxml_with_settings, ConversionSettings};
use crate::converters::smf::{parse_smf, to_json};
use crate::converters::smf_to_musicxml;
use crate::models::MidiFile;
use crate::{wasm_info, wasm_log};

fn parse_settings(settings_json: Option<String>) -> Result<ConversionSettings, JsValue> {
    match settings_json {
        Some(json) if !json.trim().is_empty() => {
            ConversionSettings::from_json(&json).map_err(|e| to_js_error("Invalid settings", e))
        }
        _ => Ok(ConversionSettings::default()),
    }
}

// ============================================================================
// MusicXML Export
// ============================================================================

/// Convert Standard MIDI File bytes to MusicXML
///
/// # Arguments
/// * `bytes` - Contents of a .mid file
/// * `title` - Work title (defaults to "Generated")
///
/// # Returns
/// MusicXML string (XML format)
#[wasm_bindgen(js_name = convertMidiToMusicXML)]
pub fn convert_midi_to_musicxml(bytes: &[u8], title: Option<String>) -> Result<String, JsValue> {
    wasm_info!("convertMidiToMusicXML called ({} bytes)", bytes.len());

    let settings = ConversionSettings::with_title(title.as_deref());
    let musicxml =
        smf_to_musicxml(bytes, &settings).map_err(|e| to_js_error("MIDI to MusicXML conversion failed", e))?;

    wasm_info!("  MusicXML generated: {} bytes", musicxml.len());
    Ok(musicxml)
}

/// Convert Standard MIDI File bytes to MusicXML with settings
///
/// # Arguments
/// * `bytes` - Contents of a .mid file
/// * `settings_json` - Optional `ConversionSettings` as JSON
#[wasm_bindgen(js_name = convertMidiFileToMusicXML)]
pub fn convert_midi_file_to_musicxml(bytes: &[u8], settings_json: Option<String>) -> Result<String, JsValue> {
    wasm_info!("convertMidiFileToMusicXML called ({} bytes)", bytes.len());

    let settings = parse_settings(settings_json)?;
    wasm_log!("  settings: {:?}", settings);

    smf_to_musicxml(bytes, &settings).map_err(|e| to_js_error("MIDI to MusicXML conversion failed", e))
}

/// Convert an already decoded MIDI structure to MusicXML
///
/// # Arguments
/// * `midi` - `{ header: { formatType, trackCount, ticksPerBeat }, tracks: [[event...]] }`
/// * `settings_json` - Optional `ConversionSettings` as JSON
#[wasm_bindgen(js_name = convertMidiEventsToMusicXML)]
pub fn convert_midi_events_to_musicxml(midi: JsValue, settings_json: Option<String>) -> Result<String, JsValue> {
    wasm_info!("convertMidiEventsToMusicXML called");

    let midi: MidiFile = deserialize(midi, "Invalid MIDI event structure")?;
    let settings = parse_settings(settings_json)?;
    wasm_log!("  {} track(s), {} ticks per beat", midi.tracks.len(), midi.header.ticks_per_beat);

    midi_to_musicxml_with_settings(&midi, &settings)
        .map_err(|e| to_js_error("MIDI to MusicXML conversion failed", e))
}

// ============================================================================
// Decoded Event Dump
// ============================================================================

/// Decode MIDI bytes and return the event structure as JSON
#[wasm_bindgen(js_name = decodeMidiToJson)]
pub fn decode_midi_to_json(bytes: &[u8]) -> Result<String, JsValue> {
    wasm_info!("decodeMidiToJson called ({} bytes)", bytes.len());

    let midi = parse_smf(bytes).map_err(|e| to_js_error("MIDI decode failed", e))?;
    to_json(&midi).map_err(|e| to_js_error("JSON serialization failed", e))
}
