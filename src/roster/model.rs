//! On-disk JSON model of the directory.
//!
//! `employees.json` holds a flat list of [`SheetEmployee`]s built from the
//! spreadsheet; the regions file holds the published directory. Fields this
//! crate does not know about are carried through a rewrite unchanged, and the
//! regions file keeps its key order.

use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{Error, Result};

/// One spreadsheet row as stored in `employees.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetEmployee {
    pub name_ar: Option<String>,
    pub title: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub starting_date: Option<String>,
    pub profile_picture: Option<String>,
}

/// An employee as published in the regions file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub position: Option<String>,
    pub position_en: Option<String>,
    pub start_date: String,
    /// Image paths; empty only when no photo could be resolved
    pub images: Vec<String>,
    pub cv: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A region of the directory.
///
/// `fields` holds every key of the region object in file order. Its
/// `employees` entry only marks where the list is written back; the list
/// itself is [`Region::employees`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub fields: Map<String, Value>,
    pub employees: Vec<Employee>,
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let employees =
            serde_json::to_value(&self.employees).map_err(<S::Error as ser::Error>::custom)?;
        with_entries(&self.fields, [(EMPLOYEES, employees)]).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let employees = take_entry::<_, D::Error>(&mut fields, EMPLOYEES)?.unwrap_or_default();
        Ok(Self { fields, employees })
    }
}

/// Directory-wide counters.
///
/// Like [`Region`], `fields` keeps every key in file order and the counters
/// are written back in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub total_employees: usize,
    /// Number of regions with at least one employee
    pub total_regions: usize,
    pub fields: Map<String, Value>,
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        with_entries(
            &self.fields,
            [
                (TOTAL_EMPLOYEES, Value::from(self.total_employees)),
                (TOTAL_REGIONS, Value::from(self.total_regions)),
            ],
        )
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            total_employees: take_entry::<_, D::Error>(&mut fields, TOTAL_EMPLOYEES)?
                .unwrap_or_default(),
            total_regions: take_entry::<_, D::Error>(&mut fields, TOTAL_REGIONS)?
                .unwrap_or_default(),
            fields,
        })
    }
}

/// The whole regions file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionsDocument {
    /// Regions keyed by region code (e.g. `SA-02`), in file order
    pub regions: IndexMap<String, Region>,
    pub metadata: Metadata,
    /// Every top-level key in file order
    pub fields: Map<String, Value>,
}

impl Serialize for RegionsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let regions =
            serde_json::to_value(&self.regions).map_err(<S::Error as ser::Error>::custom)?;
        let metadata =
            serde_json::to_value(&self.metadata).map_err(<S::Error as ser::Error>::custom)?;
        with_entries(&self.fields, [(REGIONS, regions), (METADATA, metadata)]).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RegionsDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let regions = take_entry::<_, D::Error>(&mut fields, REGIONS)?
            .ok_or_else(|| <D::Error as de::Error>::missing_field(REGIONS))?;
        Ok(Self {
            regions,
            metadata: take_entry::<_, D::Error>(&mut fields, METADATA)?.unwrap_or_default(),
            fields,
        })
    }
}

const REGIONS: &str = "regions";
const METADATA: &str = "metadata";
const EMPLOYEES: &str = "employees";
const TOTAL_EMPLOYEES: &str = "totalEmployees";
const TOTAL_REGIONS: &str = "totalRegions";

/// Move the value of `key` out of `fields`, leaving `null` at its position.
///
/// A missing or `null` entry yields `None`.
fn take_entry<T: DeserializeOwned, E: de::Error>(
    fields: &mut Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<T>, E> {
    match fields.get_mut(key) {
        Some(value) if !value.is_null() => serde_json::from_value(value.take())
            .map(Some)
            .map_err(|e| E::custom(format!("{}: {}", key, e))),
        _ => Ok(None),
    }
}

/// Copy of `fields` with `entries` written in place; new keys go last.
fn with_entries<const N: usize>(
    fields: &Map<String, Value>,
    entries: [(&str, Value); N],
) -> Map<String, Value> {
    let mut out = fields.clone();
    for (key, value) in entries {
        out.insert(key.to_string(), value);
    }
    out
}

impl RegionsDocument {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Overwrite `path` with this document.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(path.as_ref(), self)
    }

    /// Every employee of every region, in region-code order.
    pub fn employees_mut(&mut self) -> impl Iterator<Item = &mut Employee> {
        self.regions
            .values_mut()
            .flat_map(|region| region.employees.iter_mut())
    }

    /// Recompute the metadata counters from the region lists.
    pub fn refresh_metadata(&mut self) {
        self.metadata.total_employees = self.regions.values().map(|r| r.employees.len()).sum();
        self.metadata.total_regions = self
            .regions
            .values()
            .filter(|r| !r.employees.is_empty())
            .count();
    }
}

/// Read the employee list written by the sheet export.
pub fn load_sheet_employees<P: AsRef<Path>>(path: P) -> Result<Vec<SheetEmployee>> {
    load_json(path.as_ref())
}

pub fn save_sheet_employees<P: AsRef<Path>>(path: P, employees: &[SheetEmployee]) -> Result<()> {
    save_json(path.as_ref(), employees)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.is_file() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Pretty-printed with two-space indentation; non-ASCII text is written as is.
fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// A regions file with two populated regions, one empty region and
    /// descriptive fields the crate does not interpret.
    pub const REGIONS_JSON: &str = r##"{
  "regions": {
    "SA-02": {
      "id": "SA-02",
      "name": "منطقة مكة المكرمة",
      "nameEn": "Makkah Region",
      "color": "#1f77b4",
      "employees": [
        {
          "id": "emp001",
          "name": "خالد الزهراني",
          "nameEn": "Khalid Al Zahrani",
          "position": "مستشار",
          "positionEn": "Consultant",
          "startDate": "2024-01-01",
          "images": ["slides/khalid.jpg"],
          "cv": "",
          "email": "k@example.com"
        }
      ]
    },
    "SA-11": {
      "id": "SA-11",
      "name": "منطقة الباحة",
      "employees": [
        {
          "id": "emp002",
          "name": "سعيد القاضي",
          "nameEn": "Saeed Al Qadi",
          "position": null,
          "positionEn": null,
          "startDate": "2025-01-01",
          "images": [],
          "cv": ""
        }
      ]
    },
    "SA-14": {
      "id": "SA-14",
      "name": "منطقة عسير",
      "employees": []
    }
  },
  "metadata": {
    "totalEmployees": 2,
    "totalRegions": 2,
    "lastUpdated": "2025-01-15"
  }
}"##;
}

#[cfg(test)]
mod tests {
    use super::fixtures::REGIONS_JSON;
    use super::*;

    #[test]
    fn test_unknown_fields_survive_a_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        std::fs::write(&path, REGIONS_JSON).unwrap();

        let doc = RegionsDocument::load(&path).unwrap();
        assert_eq!(doc.regions.len(), 3);
        assert_eq!(doc.regions["SA-02"].fields["name"], "منطقة مكة المكرمة");
        assert_eq!(doc.regions["SA-11"].employees[0].position, None);
        doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"color\": \"#1f77b4\""));
        assert!(written.contains("\"email\": \"k@example.com\""));
        assert!(written.contains("\"lastUpdated\": \"2025-01-15\""));
        assert!(written.contains("منطقة عسير"), "non-ASCII text is not escaped");
        assert!(written.contains("\n  \"regions\": {"), "two-space indentation");

        let reread = RegionsDocument::load(&path).unwrap();
        assert_eq!(reread, doc);
    }

    #[test]
    fn test_rewrite_keeps_key_order() {
        let input = r#"{"regions":{"SA-14":{"id":"SA-14","employees":[],"name":"x"},"SA-02":{"employees":[],"id":"SA-02"}},"metadata":{"lastUpdated":"d","totalEmployees":0,"totalRegions":0},"version":2}"#;
        let doc: RegionsDocument = serde_json::from_str(input).unwrap();
        assert_eq!(
            doc.regions.keys().collect::<Vec<_>>(),
            vec!["SA-14", "SA-02"]
        );

        let output = serde_json::to_string(&doc).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_counters_and_lists_added_at_the_end() {
        let input = r#"{"regions":{"SA-02":{"id":"SA-02"}},"metadata":{"lastUpdated":"d"}}"#;
        let mut doc: RegionsDocument = serde_json::from_str(input).unwrap();
        assert!(doc.regions["SA-02"].employees.is_empty());
        doc.refresh_metadata();

        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"regions":{"SA-02":{"id":"SA-02","employees":[]}},"metadata":{"lastUpdated":"d","totalEmployees":0,"totalRegions":0}}"#
        );
    }

    #[test]
    fn test_regions_are_required() {
        assert!(serde_json::from_str::<RegionsDocument>(r#"{"metadata":{}}"#).is_err());
    }

    #[test]
    fn test_refresh_metadata() {
        let mut doc: RegionsDocument = serde_json::from_str(REGIONS_JSON).unwrap();
        doc.regions.get_mut("SA-02").unwrap().employees.clear();
        doc.refresh_metadata();
        assert_eq!(doc.metadata.total_employees, 1);
        assert_eq!(doc.metadata.total_regions, 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegionsDocument::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_sheet_employees_keep_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        let employees = vec![SheetEmployee {
            name_ar: Some("وليد النفيعي".into()),
            province: Some("منطقة مكة المكرمة".into()),
            ..SheetEmployee::default()
        }];
        save_sheet_employees(&path, &employees).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"profile_picture\": null"));
        assert_eq!(load_sheet_employees(&path).unwrap(), employees);
    }
}
