//! Error types for MIDI to MusicXML conversion
//!
//! Every variant aborts the whole document; there is no partial output.

use thiserror::Error;

use crate::converters::smf::SmfError;
use crate::renderers::musicxml::builder::XmlWriteError;

#[derive(Debug, Error)]
pub enum ConversionError {
    /// Open/close note counts disagree at the end of a track
    #[error("malformed track {track}: {started} notes started, but {ended} notes ended")]
    MalformedTrack {
        track: usize,
        started: usize,
        ended: usize,
    },

    /// noteOff with no sounding note of that pitch
    #[error("unmatched noteOff in track {track}: pitch {pitch} at tick {tick}")]
    UnmatchedNoteOff { track: usize, pitch: u8, tick: u64 },

    /// A period does not start where the measure writer expects (a bug)
    #[error("sequencing error: expected period at tick {expected}, found {found}")]
    SequencingError { expected: u64, found: u64 },

    #[error("invalid divisions: ticks per beat must be positive, got {0}")]
    InvalidDivisions(u32),

    #[error("invalid time signature {numerator}/{denominator}")]
    InvalidTimeSignature { numerator: u32, denominator: u32 },

    #[error(transparent)]
    Decode(#[from] SmfError),

    #[error(transparent)]
    Write(#[from] XmlWriteError),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
