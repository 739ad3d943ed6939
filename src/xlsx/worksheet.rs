//! Parser for Excel worksheet XML parts.
//!
//! Walks `<sheetData>` with a streaming reader and produces one [`RowRecord`]
//! per `<row>`. Cell text is taken, in order of preference, from an inline
//! string (`<is><t>`), from the shared strings table when the cell type is
//! `s`, or from the raw `<v>` value.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::cell::{RowRecord, reference_to_coords};
use super::shared_strings::SharedStrings;
use crate::opc::error::{OpcError, Result};
use crate::opc::xml::{attr_value, resolve_entity, text_content};

/// Cell currently being read.
#[derive(Debug, Default)]
struct PendingCell {
    column: u32,
    cell_type: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn from_start(e: &BytesStart<'_>, previous_column: u32) -> Result<Self> {
        let column = attr_value(e, b"r")?
            .and_then(|reference| reference_to_coords(&reference))
            .map(|(column, _)| column)
            .unwrap_or(previous_column + 1);

        Ok(Self {
            column,
            cell_type: attr_value(e, b"t")?,
            ..Self::default()
        })
    }

    /// Resolve the cell text against the shared strings table.
    fn resolve(self, shared_strings: &SharedStrings) -> Option<String> {
        if let Some(inline) = self.inline {
            return Some(inline);
        }

        let value = self.value?;
        if self.cell_type.as_deref() == Some("s") {
            let index = atoi_simd::parse_pos::<usize, false>(value.trim().as_bytes()).ok()?;
            return shared_strings.get(index).map(str::to_string);
        }
        Some(value)
    }
}

/// Which text buffer of the pending cell receives text events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    Inline,
}

/// Parse worksheet XML content into rows, in document order.
pub fn parse_worksheet_xml(content: &[u8], shared_strings: &SharedStrings) -> Result<Vec<RowRecord>> {
    let mut rows = Vec::new();
    let mut reader = Reader::from_reader(content);

    let mut buf = Vec::new();
    let mut row: Option<RowRecord> = None;
    let mut cell: Option<PendingCell> = None;
    let mut target = TextTarget::None;
    let mut last_row = 0u32;
    let mut last_column = 0u32;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"row" => {
                    last_row = row_number(e, last_row)?;
                    last_column = 0;
                    row = Some(RowRecord::new(last_row));
                },
                b"c" if row.is_some() => {
                    let pending = PendingCell::from_start(e, last_column)?;
                    last_column = pending.column;
                    cell = Some(pending);
                },
                b"v" if cell.is_some() => target = TextTarget::Value,
                b"t" => {
                    if let Some(pending) = cell.as_mut() {
                        pending.inline.get_or_insert_with(String::new);
                        target = TextTarget::Inline;
                    }
                },
                _ => {},
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"row" => {
                    last_row = row_number(e, last_row)?;
                    rows.push(RowRecord::new(last_row));
                },
                b"c" if row.is_some() => {
                    last_column = PendingCell::from_start(e, last_column)?.column;
                },
                b"t" => {
                    if let Some(pending) = cell.as_mut() {
                        pending.inline.get_or_insert_with(String::new);
                    }
                },
                _ => {},
            },
            Ok(Event::Text(ref t)) => {
                if target != TextTarget::None {
                    let text = text_content(t)?;
                    push_text(cell.as_mut(), target, &text);
                }
            },
            Ok(Event::GeneralRef(ref r)) => {
                if target != TextTarget::None
                    && let Some(ch) = resolve_entity(r)
                {
                    push_text(cell.as_mut(), target, ch.encode_utf8(&mut [0; 4]));
                }
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" | b"t" => target = TextTarget::None,
                b"c" => {
                    if let (Some(pending), Some(current)) = (cell.take(), row.as_mut()) {
                        let column = pending.column;
                        if let Some(text) = pending.resolve(shared_strings) {
                            current.cells.insert(column, text);
                        }
                    }
                },
                b"row" => {
                    if let Some(current) = row.take() {
                        rows.push(current);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OpcError::XmlError(format!(
                    "Worksheet parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(rows)
}

fn row_number(e: &BytesStart<'_>, previous: u32) -> Result<u32> {
    Ok(attr_value(e, b"r")?
        .and_then(|r| atoi_simd::parse_pos::<u32, false>(r.as_bytes()).ok())
        .unwrap_or(previous + 1))
}

fn push_text(cell: Option<&mut PendingCell>, target: TextTarget, text: &str) {
    let Some(cell) = cell else {
        return;
    };
    let buffer = match target {
        TextTarget::Value => cell.value.get_or_insert_with(String::new),
        TextTarget::Inline => cell.inline.get_or_insert_with(String::new),
        TextTarget::None => return,
    };
    buffer.push_str(text);
}
