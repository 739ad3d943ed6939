//! Workbook-level access: locate the primary worksheet and read its rows.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::Path;

use super::cell::RowRecord;
use super::shared_strings::SharedStrings;
use super::worksheet::parse_worksheet_xml;
use crate::opc::constants::xlsx;
use crate::opc::error::{OpcError, Result};
use crate::opc::xml::attr_value;
use crate::opc::{PackURI, UnpackedPackage};

/// An unpacked spreadsheet package.
#[derive(Debug)]
pub struct Workbook {
    package: UnpackedPackage,
}

impl Workbook {
    /// Unpack the spreadsheet at `path` into a scratch directory.
    pub fn open<P: AsRef<Path>>(path: P, scratch_root: Option<&Path>) -> Result<Self> {
        Ok(Self {
            package: UnpackedPackage::unpack(path, scratch_root)?,
        })
    }

    /// Locate the primary (first listed) worksheet.
    ///
    /// Follows the first `<sheet>` of the workbook through the workbook
    /// relationships; falls back to `xl/worksheets/sheet1.xml`. Returns `None`
    /// when neither exists.
    pub fn primary_worksheet(&self) -> Result<Option<PackURI>> {
        let workbook_uri = PackURI::new(xlsx::WORKBOOK).map_err(OpcError::InvalidPackUri)?;

        if let Some(workbook_xml) = self.package.optional_blob_for(&workbook_uri)?
            && let Some(r_id) = first_sheet_rel_id(&workbook_xml)?
            && let Some(rels) = self.package.rels_for(&workbook_uri)?
            && let Some(rel) = rels.get(&r_id)
            && let Ok(target) = rel.target_partname()
            && self.package.contains(&target)
        {
            return Ok(Some(target));
        }

        let fallback = PackURI::new(xlsx::FIRST_WORKSHEET).map_err(OpcError::InvalidPackUri)?;
        Ok(self.package.contains(&fallback).then_some(fallback))
    }

    /// Load the shared strings table; an absent table is empty.
    pub fn shared_strings(&self) -> Result<SharedStrings> {
        let uri = PackURI::new(xlsx::SHARED_STRINGS).map_err(OpcError::InvalidPackUri)?;
        match self.package.optional_blob_for(&uri)? {
            Some(xml) => SharedStrings::parse(&xml),
            None => Ok(SharedStrings::new()),
        }
    }

    /// Read every row of the primary worksheet except the header row (row 1).
    ///
    /// A workbook without a worksheet yields no rows and a warning.
    pub fn data_rows(&self) -> Result<Vec<RowRecord>> {
        let Some(sheet_uri) = self.primary_worksheet()? else {
            tracing::warn!(
                workbook = %self.package.source().display(),
                "no worksheet found in workbook"
            );
            return Ok(Vec::new());
        };

        let shared_strings = self.shared_strings()?;
        let xml = self.package.blob_for(&sheet_uri)?;
        let rows = parse_worksheet_xml(&xml, &shared_strings)?;

        tracing::debug!(
            worksheet = %sheet_uri,
            rows = rows.len(),
            shared_strings = shared_strings.len(),
            "parsed worksheet"
        );

        Ok(rows.into_iter().filter(|row| row.row != 1).collect())
    }
}

/// Read the data rows of a spreadsheet file in one call.
///
/// The scratch directory is removed before this function returns.
pub fn read_data_rows<P: AsRef<Path>>(path: P, scratch_root: Option<&Path>) -> Result<Vec<RowRecord>> {
    Workbook::open(path, scratch_root)?.data_rows()
}

/// Relationship ID of the first `<sheet>` element in `xl/workbook.xml`.
fn first_sheet_rel_id(workbook_xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(workbook_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    return attr_value(e, b"id");
                }
            },
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(OpcError::XmlError(format!("Workbook parse error: {}", e)));
            },
            _ => {},
        }
        buf.clear();
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Members of a small spreadsheet whose first sheet is stored as
    /// `xl/worksheets/data.xml`.
    pub fn spreadsheet_members(sheet_xml: &'static str) -> Vec<(&'static str, &'static [u8])> {
        let members: [(&'static str, &'static [u8]); 4] = [
            (
                "xl/workbook.xml",
                br#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Candidates" sheetId="1" r:id="rId3"/></sheets></workbook>"#,
            ),
            (
                "xl/_rels/workbook.xml.rels",
                br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/data.xml"/></Relationships>"#,
            ),
            (
                "xl/sharedStrings.xml",
                "<sst><si><t>الاسم</t></si><si><t>سعيد القاضي</t></si><si><t>مستشار</t></si><si><t>منطقة الباحة</t></si></sst>".as_bytes(),
            ),
            ("xl/worksheets/data.xml", sheet_xml.as_bytes()),
        ];
        members.to_vec()
    }
}
