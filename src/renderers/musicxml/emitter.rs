//! MusicXML document envelope
//!
//! Writes everything around the measures: the root element, work title,
//! encoding date and the part list.

use super::builder::{MusicXmlBuilder, Result};
use crate::models::instrument_name;

/// MusicXML version written on the root element
pub const MUSICXML_VERSION: &str = "4.0";

/// One `<score-part>` entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartListEntry {
    /// Part id, e.g. "P1"
    pub id: String,
    /// 1-based GM program
    pub program: u8,
    /// 0-based MIDI channel
    pub channel: u8,
}

impl PartListEntry {
    pub fn instrument_id(&self) -> String {
        format!("{}-I1", self.id)
    }

    pub fn name(&self) -> &'static str {
        instrument_name(self.program)
    }
}

/// Declaration, DOCTYPE, `<score-partwise>` and the work/identification blocks
///
/// Leaves `<score-partwise>` open; close it with [`MusicXmlBuilder::end_element`].
pub fn start_score(builder: &mut MusicXmlBuilder, title: &str, encoding_date: &str) -> Result<()> {
    builder.start_document()?;
    builder.start_element_with("score-partwise", &[("version", MUSICXML_VERSION)])?;

    builder.start_element("work")?;
    builder.write_element("work-title", title)?;
    builder.end_element()?; // </work>

    builder.start_element("identification")?;
    builder.start_element("encoding")?;
    builder.write_element("encoding-date", encoding_date)?;
    builder.end_element()?; // </encoding>
    builder.end_element()?; // </identification>
    Ok(())
}

pub fn write_part_list(builder: &mut MusicXmlBuilder, parts: &[PartListEntry]) -> Result<()> {
    builder.start_element("part-list")?;
    for part in parts {
        let instrument_id = part.instrument_id();

        builder.start_element_with("score-part", &[("id", part.id.as_str())])?;
        builder.write_element("part-name", part.name())?;

        builder.start_element_with("score-instrument", &[("id", instrument_id.as_str())])?;
        builder.write_element("instrument-name", part.name())?;
        builder.end_element()?; // </score-instrument>

        builder.start_element_with("midi-instrument", &[("id", instrument_id.as_str())])?;
        builder.write_element("midi-channel", part.channel as u16 + 1)?;
        builder.write_element("midi-program", part.program)?;
        builder.end_element()?; // </midi-instrument>

        builder.end_element()?; // </score-part>
    }
    builder.end_element()?; // </part-list>
    Ok(())
}
