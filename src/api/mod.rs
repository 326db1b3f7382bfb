//! MIDI to MusicXML WASM API
//!
//! JavaScript-facing entry points. Every function takes bytes or plain
//! values, runs the conversion in `crate::converters`, and reports failures
//! as string `JsValue`s.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros, value conversion and error mapping
//! - `export`: Conversion exports

pub mod helpers;
pub mod export;

pub use export::{
    convert_midi_events_to_musicxml,
    convert_midi_file_to_musicxml,
    convert_midi_to_musicxml,
    decode_midi_to_json,
};
