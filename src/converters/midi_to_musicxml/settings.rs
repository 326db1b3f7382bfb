//! Conversion settings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::renderers::musicxml::measure::ChordStyle;

/// Title used when the caller gives none
pub const DEFAULT_TITLE: &str = "Generated";

/// Tempo used when the input has no setTempo event
pub const DEFAULT_TEMPO_BPM: u32 = 120;

/// Options for MIDI to MusicXML conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionSettings {
    /// `<work-title>` text
    pub title: String,

    /// `<encoding-date>`; today's local date when unset
    pub encoding_date: Option<NaiveDate>,

    /// Spaces per nesting level (0 writes a single line)
    pub indent: usize,

    pub chord_style: ChordStyle,

    pub default_tempo_bpm: u32,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            encoding_date: None,
            indent: 2,
            chord_style: ChordStyle::default(),
            default_tempo_bpm: DEFAULT_TEMPO_BPM,
        }
    }
}

impl ConversionSettings {
    /// Default settings with an optional title
    pub fn with_title(title: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The encoding date to write, as `YYYY-MM-DD`
    pub fn encoding_date_string(&self) -> String {
        self.encoding_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }
}
