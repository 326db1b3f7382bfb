//! Note extraction
//!
//! Rebuilds closed note intervals from one track's flat event stream and
//! folds the document-wide meta events (meter, tempo, key, instruments) into
//! the shared [`DocumentContext`].

use std::collections::HashMap;

use super::errors::{ConversionError, Result};
use crate::models::{EventKind, KeySignature, Note, RawEvent, TimeSignature, DEFAULT_PROGRAM};

/// Number of MIDI channels
pub const CHANNEL_COUNT: usize = 16;

/// State shared by every track of one document
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentContext {
    /// 1-based GM program per channel
    pub instruments_by_channel: [u8; CHANNEL_COUNT],
    pub time_signature: TimeSignature,
    /// From the last setTempo event, if any
    pub microseconds_per_beat: Option<u32>,
    /// From an explicit keySignature event; overrides estimation
    pub key_signature: Option<KeySignature>,
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self {
            instruments_by_channel: [DEFAULT_PROGRAM; CHANNEL_COUNT],
            time_signature: TimeSignature::default(),
            microseconds_per_beat: None,
            key_signature: None,
        }
    }
}

impl DocumentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based GM program currently assigned to `channel`
    pub fn instrument_for(&self, channel: u8) -> u8 {
        self.instruments_by_channel
            .get(channel as usize)
            .copied()
            .unwrap_or(DEFAULT_PROGRAM)
    }

    fn apply_meta(&mut self, kind: &EventKind) {
        match *kind {
            EventKind::ProgramChange { channel, program } => {
                if let Some(slot) = self.instruments_by_channel.get_mut(channel as usize) {
                    *slot = program.saturating_add(1);
                }
            }
            EventKind::TimeSignature { numerator, denominator } => {
                self.time_signature = TimeSignature {
                    numerator: numerator as u32,
                    denominator: denominator as u32,
                };
            }
            EventKind::SetTempo { microseconds_per_beat } => {
                self.microseconds_per_beat = Some(microseconds_per_beat);
            }
            EventKind::KeySignature { key, scale } => {
                self.key_signature = Some(KeySignature::from_meta(key, scale));
            }
            _ => {}
        }
    }
}

/// Closed notes of one track
#[derive(Clone, Debug, PartialEq)]
pub struct TrackNotes {
    /// Position of the track in the input
    pub track_index: usize,
    /// Channel of the track's first channel event
    pub channel: Option<u8>,
    /// Closed notes, stable-sorted by start tick
    pub notes: Vec<Note>,
}

impl TrackNotes {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Latest end tick, i.e. the span the grouper must tile
    #[cfg(test)]
    fn last_end_tick(&self) -> u64 {
        self.notes.iter().filter_map(|n| n.end_tick).max().unwrap_or(0)
    }
}

/// Extract the notes of one track
///
/// A noteOn for a pitch that is already sounding deepens that note's
/// `conflict_depth` instead of opening a second note; each later noteOff
/// first pays that depth back before closing the note.
pub fn extract_notes(
    track_index: usize,
    track: &[RawEvent],
    context: &mut DocumentContext,
) -> Result<TrackNotes> {
    let mut current_tick = 0u64;
    let mut notes: Vec<Note> = Vec::new();
    let mut open_notes: HashMap<u8, usize> = HashMap::new();
    let mut ended = 0usize;
    let mut channel = None;

    for event in track {
        current_tick += event.delta_time as u64;

        if channel.is_none() {
            channel = event.channel();
        }

        match event.kind {
            EventKind::NoteOn { note, velocity, .. } => match open_notes.get(&note) {
                Some(&index) => {
                    notes[index].conflict_depth += 1;
                }
                None => {
                    open_notes.insert(note, notes.len());
                    notes.push(Note::open(note, current_tick, velocity));
                }
            },
            EventKind::NoteOff { note, .. } => {
                let index = *open_notes.get(&note).ok_or(ConversionError::UnmatchedNoteOff {
                    track: track_index,
                    pitch: note,
                    tick: current_tick,
                })?;

                let open = &mut notes[index];
                if open.conflict_depth > 0 {
                    open.conflict_depth -= 1;
                } else {
                    open.end_tick = Some(current_tick);
                    open_notes.remove(&note);
                    ended += 1;
                }
            }
            ref other => context.apply_meta(other),
        }
    }

    if notes.len() != ended {
        return Err(ConversionError::MalformedTrack {
            track: track_index,
            started: notes.len(),
            ended,
        });
    }

    let before = notes.len();
    notes.retain(|note| note.duration() > 0);
    if notes.len() != before {
        log::warn!(
            "track {}: dropped {} zero-length note(s)",
            track_index,
            before - notes.len()
        );
    }
    notes.sort_by_key(|note| note.start_tick);

    log::debug!("track {}: extracted {} note(s)", track_index, notes.len());

    Ok(TrackNotes {
        track_index,
        channel,
        notes,
    })
}
