//! Embedded-image references of a slide.
//!
//! A picture on a slide is a `<p:pic>` whose `<a:blip r:embed="rIdN"/>` names
//! a relationship of the slide part; the relationship target is the media part.

use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

use crate::opc::error::{OpcError, Result};
use crate::opc::xml::attr_value;

/// One `<a:blip>` occurrence on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlipRef {
    /// Relationship ID from `r:embed`, if the blip carries one
    pub r_id: Option<String>,
}

/// Blip references of one slide, in document order.
///
/// Slides rarely carry more than a handful of pictures.
pub type BlipRefs = SmallVec<[BlipRef; 8]>;

/// Collect every `<a:blip>` of the slide XML in document order.
pub fn collect_blip_refs(slide_xml: &[u8]) -> Result<BlipRefs> {
    let mut reader = Reader::from_reader(slide_xml);
    reader.config_mut().trim_text(true);

    let mut refs = BlipRefs::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"blip" {
                    let r_id = attr_value(e, b"embed")?.filter(|id| !id.is_empty());
                    refs.push(BlipRef { r_id });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpcError::XmlError(format!("Slide parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(refs)
}
