//! Small helpers shared by the quick-xml readers of this crate.
//!
//! Attribute lookups match on the local name, so `r:embed` and `embed` are the
//! same key. The reader reports entity references in text as separate
//! `Event::GeneralRef` events; [`resolve_entity`] turns them into characters.

use quick_xml::events::{BytesStart, BytesText};

use crate::opc::error::{OpcError, Result};

/// Look up an attribute of `element` by its local name.
pub fn attr_value(element: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name {
            let value = attr
                .unescape_value()
                .map_err(|e| OpcError::AttrError(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Decode a text event into an owned string.
///
/// Text events never contain entity references, so no unescaping is needed.
pub fn text_content(text: &BytesText<'_>) -> Result<String> {
    Ok(std::str::from_utf8(text)?.to_string())
}

/// Resolve the name of a general entity reference (`amp`, `#1575`, `#x627`).
pub fn resolve_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        [b'#', b'x' | b'X', hex @ ..] => std::str::from_utf8(hex)
            .ok()
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .and_then(char::from_u32),
        [b'#', dec @ ..] => atoi_simd::parse_pos::<u32, false>(dec)
            .ok()
            .and_then(char::from_u32),
        _ => None,
    }
}
