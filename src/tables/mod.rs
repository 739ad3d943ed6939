//! Lookup tables for translating spreadsheet values.
//!
//! Translation is plain substitution: a value found in a table is replaced by
//! the table entry, anything else passes through unchanged. The tables are
//! data, loaded from [`defaults`] and optionally replaced from configuration.

pub mod defaults;

use serde::Deserialize;
use std::collections::HashMap;

/// Region a province belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProvinceEntry {
    /// Region code, e.g. `SA-02`
    pub code: String,
    /// English region name
    pub name: String,
}

/// Lookups the merge step needs from its tables.
pub trait Translator {
    /// English form of an Arabic name, or the name itself.
    fn translate_name<'a>(&'a self, name: &'a str) -> &'a str;

    /// English form of an Arabic job title, or the title itself.
    fn translate_title<'a>(&'a self, title: &'a str) -> &'a str;

    /// Region of a province, if the province is known.
    fn region_for(&self, province: &str) -> Option<&ProvinceEntry>;
}

/// The full set of lookup tables.
///
/// Each table deserializes independently, so a configuration file that only
/// lists `titles` keeps the built-in names, provinces and photo hints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupTables {
    pub names: HashMap<String, String>,
    pub titles: HashMap<String, String>,
    pub provinces: HashMap<String, ProvinceEntry>,
    pub photo_hints: HashMap<String, String>,
}

impl Default for LookupTables {
    fn default() -> Self {
        Self {
            names: to_owned_map(&defaults::NAMES),
            titles: to_owned_map(&defaults::TITLES),
            provinces: defaults::PROVINCES
                .entries()
                .map(|(province, (code, name))| {
                    (
                        province.to_string(),
                        ProvinceEntry {
                            code: code.to_string(),
                            name: name.to_string(),
                        },
                    )
                })
                .collect(),
            photo_hints: to_owned_map(&defaults::PHOTO_HINTS),
        }
    }
}

impl LookupTables {
    /// Filename fragment identifying the photo of `name`.
    pub fn photo_hint(&self, name: &str) -> Option<&str> {
        self.photo_hints.get(name).map(String::as_str)
    }
}

impl Translator for LookupTables {
    fn translate_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map_or(name, String::as_str)
    }

    fn translate_title<'a>(&'a self, title: &'a str) -> &'a str {
        self.titles.get(title).map_or(title, String::as_str)
    }

    fn region_for(&self, province: &str) -> Option<&ProvinceEntry> {
        self.provinces.get(province)
    }
}

fn to_owned_map(map: &phf::Map<&'static str, &'static str>) -> HashMap<String, String> {
    map.entries()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
