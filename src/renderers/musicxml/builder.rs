// MusicXML document builder

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;
use std::io::Cursor;
use thiserror::Error;

/// MusicXML 4.0 partwise DOCTYPE body
pub const PARTWISE_DOCTYPE: &str = r#"score-partwise PUBLIC "-//Recordare//DTD MusicXML 4.0 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd""#;

#[derive(Debug, Error)]
pub enum XmlWriteError {
    #[error("xml write error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("unbalanced element: {0}")]
    Unbalanced(String),
}

pub type Result<T> = std::result::Result<T, XmlWriteError>;

/// Streaming element writer over quick-xml
///
/// Keeps a stack of open element names so callers can close elements without
/// repeating their names, the way a measure is opened in one place and closed
/// in another.
pub struct MusicXmlBuilder {
    writer: Writer<Cursor<Vec<u8>>>,
    open_elements: Vec<String>,
}

impl MusicXmlBuilder {
    /// Create a builder indenting nested elements by `indent` spaces
    pub fn new(indent: usize) -> Self {
        let writer = if indent == 0 {
            Writer::new(Cursor::new(Vec::new()))
        } else {
            Writer::new_with_indent(Cursor::new(Vec::new()), b' ', indent)
        };
        Self {
            writer,
            open_elements: Vec::new(),
        }
    }

    /// XML declaration plus the partwise DOCTYPE
    pub fn start_document(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(PARTWISE_DOCTYPE)))?;
        Ok(())
    }

    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.start_element_with(name, &[])
    }

    pub fn start_element_with(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        self.open_elements.push(name.to_string());
        Ok(())
    }

    /// Close the innermost open element
    pub fn end_element(&mut self) -> Result<()> {
        let name = self
            .open_elements
            .pop()
            .ok_or_else(|| XmlWriteError::Unbalanced("no open element to close".to_string()))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name>text</name>`, text escaped
    pub fn write_element<T: Display>(&mut self, name: &str, text: T) -> Result<()> {
        let text = text.to_string();
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(&text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name attr="..."/>`
    pub fn write_empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Number of currently open elements
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.open_elements.len()
    }

    /// Consume the builder and return the document text
    ///
    /// Every opened element must have been closed.
    pub fn finish(self) -> Result<String> {
        if let Some(name) = self.open_elements.last() {
            return Err(XmlWriteError::Unbalanced(format!(
                "<{}> still open at end of document",
                name
            )));
        }
        let bytes = self.writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}
