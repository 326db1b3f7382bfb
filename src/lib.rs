//! MIDI to MusicXML WASM Module
//!
//! Converts a decoded MIDI event stream (or raw Standard MIDI File bytes)
//! into a MusicXML 4.0 partwise score.

pub mod api;
pub mod converters;
pub mod models;
pub mod renderers;

// Re-export commonly used types
pub use converters::{midi_to_musicxml, midi_to_musicxml_with_settings, smf_to_musicxml};
pub use converters::{ConversionError, ConversionSettings};
pub use models::{MidiFile, MidiHeader, RawEvent};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (e.g. module re-instantiated) keeps the first logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("MIDI to MusicXML WASM module initialized");
}
