//! Shared strings table for Excel files.
//!
//! Text cells refer to entries of `xl/sharedStrings.xml` by index. Every
//! `<si>` produces exactly one entry, even when it holds no text, so that
//! indices stay aligned with the cells that reference them.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::opc::error::{OpcError, Result};
use crate::opc::xml::{resolve_entity, text_content};

/// Shared strings table.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse shared strings from `xl/sharedStrings.xml` content.
    ///
    /// Rich-text runs of one item are concatenated; phonetic runs (`<rPh>`)
    /// are skipped.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = Reader::from_reader(content);

        let mut buf = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"rPh" => phonetic_depth += 1,
                    b"t" => in_text = current.is_some() && phonetic_depth == 0,
                    _ => {},
                },
                Ok(Event::Empty(ref e)) => {
                    if e.local_name().as_ref() == b"si" {
                        strings.push(String::new());
                    }
                },
                Ok(Event::Text(ref t)) => {
                    if in_text && let Some(text) = current.as_mut() {
                        text.push_str(&text_content(t)?);
                    }
                },
                Ok(Event::GeneralRef(ref r)) => {
                    if in_text
                        && let Some(text) = current.as_mut()
                        && let Some(ch) = resolve_entity(r)
                    {
                        text.push(ch);
                    }
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"si" => {
                        if let Some(text) = current.take() {
                            strings.push(text);
                        }
                    },
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Shared strings parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
