//! Document assembly
//!
//! Runs extraction over every track, estimates the key once all pitch
//! classes are known, groups each non-empty track into periods, and then
//! writes the score. Analysis ([`plan_score`]) and writing ([`render_score`])
//! are separate so the plan can be inspected without XML.

use std::collections::BTreeSet;

use super::errors::Result;
use super::extract::{extract_notes, DocumentContext, TrackNotes, CHANNEL_COUNT};
use super::grouping::group_notes_by_time_period;
use super::key_signature::estimate_key_signature;
use super::settings::ConversionSettings;
use crate::models::{Clef, KeySignature, MidiFile, NoteType, PeriodChord, Tempo};
use crate::renderers::musicxml::builder::MusicXmlBuilder;
use crate::renderers::musicxml::emitter::{start_score, write_part_list, PartListEntry};
use crate::renderers::musicxml::measure::{MeasureWriter, PartAttributes};

/// One part ready to be written
#[derive(Clone, Debug, PartialEq)]
pub struct PartPlan {
    pub entry: PartListEntry,
    /// Index of the source track
    pub track_index: usize,
    pub attributes: PartAttributes,
    pub periods: Vec<PeriodChord>,
}

/// Everything needed to write a score
#[derive(Clone, Debug, PartialEq)]
pub struct ScorePlan {
    pub key_signature: Option<KeySignature>,
    pub tempo: Tempo,
    pub parts: Vec<PartPlan>,
}

/// Distinct pitch classes sounded anywhere in the document
pub fn collect_pitch_classes(tracks: &[TrackNotes]) -> BTreeSet<u8> {
    tracks
        .iter()
        .flat_map(|track| track.notes.iter())
        .map(|note| note.pitch % 12)
        .collect()
}

/// Analyse a decoded MIDI file into a [`ScorePlan`]
pub fn plan_score(midi: &MidiFile, settings: &ConversionSettings) -> Result<ScorePlan> {
    let mut context = DocumentContext::new();

    let tracks = midi
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| extract_notes(index, track, &mut context))
        .collect::<Result<Vec<_>>>()?;

    let key_signature = match context.key_signature {
        Some(explicit) => Some(explicit),
        None => estimate_key_signature(&collect_pitch_classes(&tracks)),
    };

    let tempo = Tempo::new(
        NoteType::from_denominator(context.time_signature.denominator),
        context
            .microseconds_per_beat
            .map(Tempo::bpm_from_microseconds)
            .unwrap_or(settings.default_tempo_bpm),
    );

    let parts = tracks
        .iter()
        .filter(|track| !track.is_empty())
        .enumerate()
        .map(|(ordinal, track)| {
            let channel = track
                .channel
                .unwrap_or((track.track_index % CHANNEL_COUNT) as u8);
            PartPlan {
                entry: PartListEntry {
                    id: format!("P{}", ordinal + 1),
                    program: context.instrument_for(channel),
                    channel,
                },
                track_index: track.track_index,
                attributes: PartAttributes {
                    divisions: midi.header.ticks_per_beat,
                    time_signature: context.time_signature,
                    key_signature,
                    tempo,
                    clef: if ordinal == 0 { Clef::Treble } else { Clef::Bass },
                },
                periods: group_notes_by_time_period(&track.notes),
            }
        })
        .collect::<Vec<_>>();

    log::info!(
        "planned {} part(s) from {} track(s), key {:?}",
        parts.len(),
        tracks.len(),
        key_signature
    );

    Ok(ScorePlan {
        key_signature,
        tempo,
        parts,
    })
}

/// Write a planned score as a MusicXML string
pub fn render_score(plan: &ScorePlan, settings: &ConversionSettings) -> Result<String> {
    let mut builder = MusicXmlBuilder::new(settings.indent);

    start_score(&mut builder, &settings.title, &settings.encoding_date_string())?;

    let entries: Vec<PartListEntry> = plan.parts.iter().map(|part| part.entry.clone()).collect();
    write_part_list(&mut builder, &entries)?;

    for part in &plan.parts {
        builder.start_element_with("part", &[("id", part.entry.id.as_str())])?;
        let mut writer = MeasureWriter::new(&part.attributes, settings.chord_style);
        let measures = writer.write_part(&mut builder, &part.periods)?;
        builder.end_element()?; // </part>

        log::debug!("part {}: wrote {} measure(s)", part.entry.id, measures);
    }

    builder.end_element()?; // </score-partwise>
    Ok(builder.finish()?)
}
