//! MusicXML measure writing
//!
//! Lays a track's time periods onto an absolute measure grid and writes the
//! resulting measures. The grid starts at tick 0, not at the first note, and
//! every measure spans `divisions * numerator` ticks.
//!
//! ## Measure FSM
//!
//! ```text
//! [Closed] --next period--> [Open] --period ends inside--> [Open]
//!                             |
//!                             +--period reaches the barline--> [Closed]
//!                             |
//!                             +--period crosses the barline--> [Closed]
//!                                  (remainder re-queued for the next measure)
//! ```
//!
//! A period that crosses a barline is cut into independent fragments; no tie
//! is written between them.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::builder::MusicXmlBuilder;
use crate::converters::midi_to_musicxml::errors::ConversionError;
use crate::models::{Chord, Clef, KeySignature, PeriodChord, Tempo, TimePeriod, TimeSignature};

/// How simultaneous pitches are written
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChordStyle {
    /// One `<note>` holding every `<pitch>` and a single `<duration>`
    #[default]
    SharedNote,
    /// One `<note>` per pitch, later ones marked `<chord/>`
    ChordElements,
}

/// Attributes written once at the top of a part
#[derive(Clone, Debug, PartialEq)]
pub struct PartAttributes {
    /// Ticks per quarter note
    pub divisions: u32,
    pub time_signature: TimeSignature,
    pub key_signature: Option<KeySignature>,
    pub tempo: Tempo,
    pub clef: Clef,
}

impl PartAttributes {
    /// Ticks in one measure
    pub fn measure_ticks(&self) -> Result<u64, ConversionError> {
        if self.divisions == 0 {
            return Err(ConversionError::InvalidDivisions(self.divisions));
        }
        let TimeSignature { numerator, denominator } = self.time_signature;
        if numerator == 0 || denominator == 0 {
            return Err(ConversionError::InvalidTimeSignature { numerator, denominator });
        }
        Ok(self.divisions as u64 * numerator as u64)
    }
}

/// One closed measure's fragments
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    /// 1-based measure number
    pub number: u32,
    pub fragments: Vec<PeriodChord>,
}

impl Bar {
    fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    pub fn duration(&self) -> u64 {
        self.fragments.iter().map(PeriodChord::duration).sum()
    }
}

/// Cut a contiguous period sequence into measures
///
/// Fails with [`ConversionError::SequencingError`] when a period does not
/// start where the previous one ended.
pub fn measurize(periods: &[PeriodChord], measure_ticks: u64) -> Result<Vec<Bar>, ConversionError> {
    if measure_ticks == 0 {
        return Err(ConversionError::InvalidDivisions(0));
    }

    let mut queue: VecDeque<PeriodChord> = periods.iter().cloned().collect();
    let mut bars = Vec::new();
    let mut open_bar: Option<Bar> = None;
    let mut current_tick = 0u64;
    let mut measure_number = 0u32;

    while let Some(item) = queue.pop_front() {
        let bar = open_bar.get_or_insert_with(|| {
            measure_number += 1;
            Bar::new(measure_number)
        });
        let measure_end_tick = measure_ticks * bar.number as u64;

        if item.period.start_tick != current_tick {
            return Err(ConversionError::SequencingError {
                expected: current_tick,
                found: item.period.start_tick,
            });
        }

        if item.period.end_tick <= measure_end_tick {
            current_tick = item.period.end_tick;
            bar.fragments.push(item);
        } else {
            let PeriodChord { period, chord } = item;
            bar.fragments.push(PeriodChord::new(
                TimePeriod::new(period.start_tick, measure_end_tick),
                chord.clone(),
            ));
            queue.push_front(PeriodChord::new(
                TimePeriod::new(measure_end_tick, period.end_tick),
                chord,
            ));
            current_tick = measure_end_tick;
        }

        if current_tick == measure_end_tick {
            debug_assert_eq!(bar.duration(), measure_ticks, "measure {} not full", bar.number);
            bars.extend(open_bar.take());
        }
    }

    bars.extend(open_bar.take());
    Ok(bars)
}

/// Writes one part's measures
///
/// `header_written` flips on the first measure so the attributes block and the
/// metronome direction appear exactly once per part.
pub struct MeasureWriter<'a> {
    attributes: &'a PartAttributes,
    chord_style: ChordStyle,
    header_written: bool,
}

impl<'a> MeasureWriter<'a> {
    pub fn new(attributes: &'a PartAttributes, chord_style: ChordStyle) -> Self {
        Self {
            attributes,
            chord_style,
            header_written: false,
        }
    }

    #[cfg(test)]
    fn header_written(&self) -> bool {
        self.header_written
    }

    /// Write every measure of one part; returns the number of measures
    pub fn write_part(
        &mut self,
        builder: &mut MusicXmlBuilder,
        periods: &[PeriodChord],
    ) -> Result<usize, ConversionError> {
        let measure_ticks = self.attributes.measure_ticks()?;
        let bars = measurize(periods, measure_ticks)?;

        for bar in &bars {
            let number = bar.number.to_string();
            builder.start_element_with("measure", &[("number", number.as_str())])?;

            if !self.header_written {
                self.write_header(builder)?;
                self.header_written = true;
            }

            for fragment in &bar.fragments {
                write_note(builder, &fragment.chord, fragment.duration(), self.chord_style)?;
            }

            builder.end_element()?; // </measure>
        }

        Ok(bars.len())
    }

    fn write_header(&self, builder: &mut MusicXmlBuilder) -> Result<(), ConversionError> {
        let attrs = self.attributes;

        builder.start_element("attributes")?;
        builder.write_element("divisions", attrs.divisions)?;
        if let Some(key) = attrs.key_signature {
            builder.start_element("key")?;
            builder.write_element("fifths", key.fifths)?;
            builder.write_element("mode", key.mode.xml_name())?;
            builder.end_element()?; // </key>
        }
        builder.start_element("time")?;
        builder.write_element("beats", attrs.time_signature.numerator)?;
        builder.write_element("beat-type", attrs.time_signature.denominator)?;
        builder.end_element()?; // </time>
        builder.start_element("clef")?;
        builder.write_element("sign", attrs.clef.sign())?;
        builder.write_element("line", attrs.clef.line())?;
        builder.end_element()?; // </clef>
        builder.end_element()?; // </attributes>

        builder.start_element_with("direction", &[("placement", "above")])?;
        builder.start_element("direction-type")?;
        builder.start_element("metronome")?;
        builder.write_element("beat-unit", attrs.tempo.beat_unit.xml_name())?;
        builder.write_element("per-minute", attrs.tempo.beats_per_minute)?;
        builder.end_element()?; // </metronome>
        builder.end_element()?; // </direction-type>
        builder.end_element()?; // </direction>

        Ok(())
    }
}

/// Write a rest or chord of the given duration
pub fn write_note(
    builder: &mut MusicXmlBuilder,
    chord: &Chord,
    duration: u64,
    style: ChordStyle,
) -> Result<(), ConversionError> {
    if chord.is_rest() {
        builder.start_element("note")?;
        builder.write_empty("rest", &[])?;
        builder.write_element("duration", duration)?;
        builder.end_element()?;
        return Ok(());
    }

    let pitches = chord.notated_pitches();
    match style {
        ChordStyle::SharedNote => {
            builder.start_element("note")?;
            for pitch in &pitches {
                write_pitch(builder, pitch)?;
            }
            builder.write_element("duration", duration)?;
            builder.end_element()?;
        }
        ChordStyle::ChordElements => {
            for (index, pitch) in pitches.iter().enumerate() {
                builder.start_element("note")?;
                if index > 0 {
                    builder.write_empty("chord", &[])?;
                }
                write_pitch(builder, pitch)?;
                builder.write_element("duration", duration)?;
                builder.end_element()?;
            }
        }
    }
    Ok(())
}

fn write_pitch(
    builder: &mut MusicXmlBuilder,
    pitch: &crate::models::NotatedPitch,
) -> Result<(), ConversionError> {
    builder.start_element("pitch")?;
    builder.write_element("step", pitch.step)?;
    if let Some(alter) = pitch.alter {
        builder.write_element("alter", alter)?;
    }
    builder.write_element("octave", pitch.octave)?;
    builder.end_element()?;
    Ok(())
}
