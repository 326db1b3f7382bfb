//! Standard MIDI File decoding
//!
//! Adapts `midly`'s parsed file into the [`MidiFile`] event model. NoteOn with
//! velocity 0 is reported as noteOff, and time-signature denominators are
//! expanded from their power-of-two encoding.

use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use thiserror::Error;

use crate::models::{EventKind, EventType, MidiFile, MidiHeader, RawEvent, Track};

#[derive(Debug, Error)]
pub enum SmfError {
    #[error("midi parse error: {0}")]
    Parse(#[from] midly::Error),
    #[error("unsupported timing: SMPTE timecode files have no ticks per beat")]
    UnsupportedTiming,
}

/// Decode SMF bytes
pub fn parse_smf(bytes: &[u8]) -> Result<MidiFile, SmfError> {
    let smf = Smf::parse(bytes)?;
    from_smf(&smf)
}

/// Convert an already parsed `midly` file
pub fn from_smf(smf: &Smf<'_>) -> Result<MidiFile, SmfError> {
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(ticks) => ticks.as_int() as u32,
        Timing::Timecode(..) => return Err(SmfError::UnsupportedTiming),
    };

    let format_type = match smf.header.format {
        Format::SingleTrack => 0,
        Format::Parallel => 1,
        Format::Sequential => 2,
    };

    let tracks: Vec<Track> = smf
        .tracks
        .iter()
        .map(|track| track.iter().map(convert_event).collect())
        .collect();

    log::debug!(
        "decoded SMF format {} with {} track(s), {} ticks per beat",
        format_type,
        tracks.len(),
        ticks_per_beat
    );

    Ok(MidiFile {
        header: MidiHeader {
            format_type,
            track_count: tracks.len() as u16,
            ticks_per_beat,
        },
        tracks,
    })
}

fn convert_event(event: &TrackEvent<'_>) -> RawEvent {
    let delta_time = event.delta.as_int();
    let (event_type, kind) = match event.kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            let kind = match message {
                // NoteOn with velocity=0 is equivalent to NoteOff
                MidiMessage::NoteOn { key, vel } if vel.as_int() == 0 => EventKind::NoteOff {
                    channel,
                    note: key.as_int(),
                    velocity: 0,
                },
                MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::NoteOff { key, vel } => EventKind::NoteOff {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::ProgramChange { program } => EventKind::ProgramChange {
                    channel,
                    program: program.as_int(),
                },
                _ => EventKind::Other,
            };
            (EventType::Channel, kind)
        }
        TrackEventKind::Meta(meta) => {
            let kind = match meta {
                MetaMessage::Tempo(tempo) => EventKind::SetTempo {
                    microseconds_per_beat: tempo.as_int(),
                },
                MetaMessage::TimeSignature(numerator, denominator_power, _, _) => EventKind::TimeSignature {
                    numerator,
                    denominator: 1u8.checked_shl(denominator_power as u32).unwrap_or(0),
                },
                MetaMessage::KeySignature(key, minor) => EventKind::KeySignature {
                    key,
                    scale: minor as u8,
                },
                _ => EventKind::Other,
            };
            (EventType::Meta, kind)
        }
        TrackEventKind::SysEx(_) => (EventType::SysEx, EventKind::Other),
        TrackEventKind::Escape(_) => (EventType::DividedSysEx, EventKind::Other),
    };

    RawEvent {
        delta_time,
        event_type,
        kind,
    }
}

/// Pretty JSON dump of a decoded file, in the decoder's field layout
pub fn to_json(midi: &MidiFile) -> serde_json::Result<String> {
    serde_json::to_string_pretty(midi)
}
