//! Decoded MIDI event stream
//!
//! These types describe a MIDI file after byte-level decoding: a header plus
//! one ordered event list per track, each event carrying the ticks elapsed
//! since the previous event. The serde layout matches the JSON produced by
//! JavaScript MIDI decoders (`deltaTime`, `type`, `subType`, ...), so the same
//! structure can arrive from JavaScript or from [`crate::converters::smf`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A decoded MIDI file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MidiFile {
    pub header: MidiHeader,
    pub tracks: Vec<Track>,
}

/// Header chunk fields
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MidiHeader {
    /// SMF format (0 = single track, 1 = parallel tracks, 2 = sequential)
    pub format_type: u16,
    pub track_count: u16,
    /// Ticks per quarter note; becomes MusicXML `<divisions>`
    pub ticks_per_beat: u32,
}

/// One track's ordered events
pub type Track = Vec<RawEvent>;

/// A single timed event
///
/// SysEx events carry no `subType`; they decode with [`EventKind::Other`].
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Ticks since the previous event in the same track
    pub delta_time: u32,

    #[serde(rename = "type")]
    pub event_type: EventType,

    #[serde(flatten)]
    pub kind: EventKind,
}

/// Wire layout of [`RawEvent`] with the payload fields still untyped
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventFields {
    delta_time: u32,
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(flatten)]
    payload: serde_json::Map<String, serde_json::Value>,
}

impl<'de> Deserialize<'de> for RawEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = RawEventFields::deserialize(deserializer)?;
        let kind = if fields.payload.contains_key("subType") {
            EventKind::deserialize(serde_json::Value::Object(fields.payload)).map_err(D::Error::custom)?
        } else {
            EventKind::Other
        };

        Ok(Self {
            delta_time: fields.delta_time,
            event_type: fields.event_type,
            kind,
        })
    }
}

/// Coarse event class
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Channel,
    Meta,
    SysEx,
    DividedSysEx,
}

/// Event payload, discriminated by `subType`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "subType", rename_all = "camelCase")]
pub enum EventKind {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ProgramChange { channel: u8, program: u8 },
    TimeSignature { numerator: u8, denominator: u8 },
    #[serde(rename_all = "camelCase")]
    SetTempo { microseconds_per_beat: u32 },
    /// `key` is the signed fifths count, `scale` 0 = major, 1 = minor
    KeySignature { key: i8, scale: u8 },
    #[serde(other)]
    Other,
}

impl RawEvent {
    pub fn note_on(delta_time: u32, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            delta_time,
            event_type: EventType::Channel,
            kind: EventKind::NoteOn { channel, note, velocity },
        }
    }

    pub fn note_off(delta_time: u32, channel: u8, note: u8) -> Self {
        Self {
            delta_time,
            event_type: EventType::Channel,
            kind: EventKind::NoteOff { channel, note, velocity: 0 },
        }
    }

    pub fn program_change(delta_time: u32, channel: u8, program: u8) -> Self {
        Self {
            delta_time,
            event_type: EventType::Channel,
            kind: EventKind::ProgramChange { channel, program },
        }
    }

    pub fn meta(delta_time: u32, kind: EventKind) -> Self {
        Self {
            delta_time,
            event_type: EventType::Meta,
            kind,
        }
    }

    /// Channel number for channel events
    pub fn channel(&self) -> Option<u8> {
        match self.kind {
            EventKind::NoteOn { channel, .. }
            | EventKind::NoteOff { channel, .. }
            | EventKind::ProgramChange { channel, .. } => Some(channel),
            _ => None,
        }
    }
}

impl MidiFile {
    pub fn new(ticks_per_beat: u32, tracks: Vec<Track>) -> Self {
        Self {
            header: MidiHeader {
                format_type: if tracks.len() > 1 { 1 } else { 0 },
                track_count: u16::try_from(tracks.len()).unwrap_or(u16::MAX),
                ticks_per_beat,
            },
            tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_decoder_json() {
        let json = r#"{
            "header": { "formatType": 1, "trackCount": 1, "ticksPerBeat": 480 },
            "tracks": [[
                { "deltaTime": 0, "type": "meta", "subType": "setTempo", "microsecondsPerBeat": 500000 },
                { "deltaTime": 0, "type": "channel", "subType": "noteOn", "channel": 0, "note": 60, "velocity": 90 },
                { "deltaTime": 480, "type": "channel", "subType": "noteOff", "channel": 0, "note": 60, "velocity": 0 },
                { "deltaTime": 0, "type": "meta", "subType": "endOfTrack" }
            ]]
        }"#;

        let midi: MidiFile = serde_json::from_str(json).unwrap();
        assert_eq!(midi.header.ticks_per_beat, 480);
        assert_eq!(midi.tracks[0].len(), 4);
        assert_eq!(
            midi.tracks[0][0].kind,
            EventKind::SetTempo { microseconds_per_beat: 500_000 }
        );
        assert_eq!(midi.tracks[0][1], RawEvent::note_on(0, 0, 60, 90));
        assert_eq!(midi.tracks[0][2].delta_time, 480);
        assert_eq!(midi.tracks[0][3].kind, EventKind::Other);
    }

    #[test]
    fn test_sysex_without_subtype_is_other() {
        let json = r#"[
            { "deltaTime": 0, "type": "meta", "subType": "trackName", "text": "Piano" },
            { "deltaTime": 0, "type": "sysEx", "data": [126, 127, 9, 1, 247] },
            { "deltaTime": 0, "type": "channel", "subType": "controller", "channel": 0, "controllerType": 7, "value": 100 },
            { "deltaTime": 0, "type": "channel", "subType": "noteOn", "channel": 0, "note": 61, "velocity": 90 },
            { "deltaTime": 2000, "type": "channel", "subType": "noteOff", "channel": 0, "note": 61, "velocity": 0 },
            { "deltaTime": 0, "type": "dividedSysEx", "data": [1] }
        ]"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.len(), 6);
        assert_eq!(track[0].kind, EventKind::Other);
        assert_eq!(track[1].event_type, EventType::SysEx);
        assert_eq!(track[1].kind, EventKind::Other);
        assert_eq!(track[2].kind, EventKind::Other);
        assert_eq!(track[2].channel(), None);
        assert_eq!(track[3], RawEvent::note_on(0, 0, 61, 90));
        assert_eq!(track[4], RawEvent::note_off(2000, 0, 61));
        assert_eq!(track[5].event_type, EventType::DividedSysEx);
        assert_eq!(track[5].kind, EventKind::Other);
    }

    #[test]
    fn test_bad_payload_still_rejected() {
        let json = r#"{ "deltaTime": 0, "type": "channel", "subType": "noteOn", "channel": 0, "note": 60 }"#;
        assert!(serde_json::from_str::<RawEvent>(json).is_err());
    }

    #[test]
    fn test_track_count_saturates() {
        let midi = MidiFile::new(480, vec![Vec::new(); 70_000]);
        assert_eq!(midi.header.track_count, u16::MAX);
        assert_eq!(midi.tracks.len(), 70_000);
    }

    #[test]
    fn test_negative_key_signature() {
        let json = r#"{ "deltaTime": 0, "type": "meta", "subType": "keySignature", "key": -3, "scale": 1 }"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::KeySignature { key: -3, scale: 1 });
        assert_eq!(event.channel(), None);
    }

    #[test]
    fn test_channel_accessor() {
        assert_eq!(RawEvent::program_change(0, 3, 40).channel(), Some(3));
        assert_eq!(RawEvent::note_off(0, 9, 36).channel(), Some(9));
    }
}
