//! Renderers module
//!
//! Output writers. MusicXML is currently the only target.

pub mod musicxml;

pub use musicxml::builder::{MusicXmlBuilder, XmlWriteError};
