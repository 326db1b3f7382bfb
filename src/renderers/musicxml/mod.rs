//! MusicXML writer
//!
//! # Module Structure
//!
//! - **builder**: Indented XML writer with an open-element stack
//! - **measure**: Barline splitting and measure/note emission
//! - **emitter**: Document prologue and part list

pub mod builder;
pub mod emitter;
pub mod measure;

pub use builder::{MusicXmlBuilder, XmlWriteError, PARTWISE_DOCTYPE};
pub use emitter::{start_score, write_part_list, PartListEntry, MUSICXML_VERSION};
pub use measure::{measurize, Bar, ChordStyle, MeasureWriter, PartAttributes};
