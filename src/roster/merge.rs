//! Merging the flat employee list into the regions file.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::model::{Employee, RegionsDocument, SheetEmployee};
use crate::tables::Translator;

/// Values the merge fills in that the spreadsheet does not provide.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Start date used when the sheet has none
    pub default_start_date: String,
    /// Prepended to a profile picture filename to form its image path
    pub image_prefix: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            default_start_date: "2025-01-01".to_string(),
            image_prefix: "slides/".to_string(),
        }
    }
}

/// Why an employee was not placed in any region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnmatchedReason {
    /// The province is not in the province table
    UnknownProvince,
    /// The province maps to a region code the regions file does not have
    RegionMissing(String),
}

/// An employee left out of the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Unmatched {
    pub employee: SheetEmployee,
    pub reason: UnmatchedReason,
}

/// Outcome of a merge.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Employees placed per region code
    pub placed: BTreeMap<String, usize>,
    pub unmatched: Vec<Unmatched>,
}

impl MergeReport {
    pub fn total_placed(&self) -> usize {
        self.placed.values().sum()
    }
}

/// Replace every region's employee list with the employees of `employees`
/// that belong to it, and recompute the metadata.
///
/// Placed employees get sequential IDs (`emp001`, `emp002`, ...) in input
/// order. Every input employee is either placed or reported as unmatched.
pub fn merge_employees<T: Translator + ?Sized>(
    document: &mut RegionsDocument,
    employees: &[SheetEmployee],
    translator: &T,
    options: &MergeOptions,
) -> MergeReport {
    let mut buckets: BTreeMap<String, Vec<Employee>> = document
        .regions
        .keys()
        .map(|code| (code.clone(), Vec::new()))
        .collect();
    let mut unmatched = Vec::new();
    let mut next_id = 1usize;

    for sheet in employees {
        let province = sheet.province.as_deref().unwrap_or_default();
        let Some(region) = translator.region_for(province) else {
            unmatched.push(Unmatched {
                employee: sheet.clone(),
                reason: UnmatchedReason::UnknownProvince,
            });
            continue;
        };
        let Some(bucket) = buckets.get_mut(&region.code) else {
            unmatched.push(Unmatched {
                employee: sheet.clone(),
                reason: UnmatchedReason::RegionMissing(region.code.clone()),
            });
            continue;
        };

        bucket.push(to_employee(sheet, next_id, translator, options));
        next_id += 1;
    }

    let mut report = MergeReport {
        unmatched,
        ..MergeReport::default()
    };
    for (code, list) in buckets {
        report.placed.insert(code.clone(), list.len());
        if let Some(region) = document.regions.get_mut(&code) {
            region.employees = list;
        }
    }
    document.refresh_metadata();

    tracing::info!(
        placed = report.total_placed(),
        unmatched = report.unmatched.len(),
        regions = document.metadata.total_regions,
        "merged employees into regions"
    );

    report
}

fn to_employee<T: Translator + ?Sized>(
    sheet: &SheetEmployee,
    id: usize,
    translator: &T,
    options: &MergeOptions,
) -> Employee {
    let name = sheet.name_ar.clone().unwrap_or_default();
    let images = sheet
        .profile_picture
        .iter()
        .filter(|picture| !picture.is_empty())
        .map(|picture| format!("{}{}", options.image_prefix, picture))
        .collect();

    Employee {
        id: format!("emp{:03}", id),
        name_en: translator.translate_name(&name).to_string(),
        name,
        position: sheet.title.clone(),
        position_en: sheet
            .title
            .as_deref()
            .map(|title| translator.translate_title(title).to_string()),
        start_date: sheet
            .starting_date
            .clone()
            .filter(|date| !date.is_empty())
            .unwrap_or_else(|| options.default_start_date.clone()),
        images,
        cv: String::new(),
        extra: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::model::fixtures::REGIONS_JSON;
    use crate::tables::LookupTables;

    fn sheet(name: &str, province: Option<&str>, picture: Option<&str>) -> SheetEmployee {
        SheetEmployee {
            name_ar: Some(name.to_string()),
            title: Some("مستشار".to_string()),
            province: province.map(str::to_string),
            profile_picture: picture.map(str::to_string),
            ..SheetEmployee::default()
        }
    }

    #[test]
    fn test_merge_is_total_and_counts_reconcile() {
        let mut doc: RegionsDocument = serde_json::from_str(REGIONS_JSON).unwrap();
        let tables = LookupTables::default();
        let employees = vec![
            sheet("عبدالله النصر", Some("منطقة عسير"), Some("abdullah_alnaser.jpg")),
            sheet("اسم مجهول", Some("منطقة الرياض"), None),
            sheet("سعيد القاضي", Some("منطقة الباحة"), None),
            sheet("وليد النفيعي", Some("منطقة مكة المكرمة"), Some("waleed_alnufaii.png")),
            sheet("فهد السحيباني", Some("منطقة القصيم"), None),
            sheet("بدون منطقة", None, None),
        ];

        let report = merge_employees(&mut doc, &employees, &tables, &MergeOptions::default());

        assert_eq!(report.total_placed() + report.unmatched.len(), employees.len());
        assert_eq!(report.total_placed(), 3);
        assert_eq!(doc.metadata.total_employees, 3);
        assert_eq!(doc.metadata.total_regions, 3);
        assert_eq!(
            doc.metadata.fields.get("lastUpdated").and_then(|v| v.as_str()),
            Some("2025-01-15")
        );

        let reasons: Vec<_> = report.unmatched.iter().map(|u| u.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                UnmatchedReason::UnknownProvince,
                UnmatchedReason::RegionMissing("SA-05".to_string()),
                UnmatchedReason::UnknownProvince,
            ]
        );

        let asir = &doc.regions["SA-14"].employees;
        assert_eq!(asir.len(), 1);
        assert_eq!(asir[0].id, "emp001");
        assert_eq!(asir[0].name_en, "Abdullah Al Nasser");
        assert_eq!(asir[0].position_en.as_deref(), Some("Consultant"));
        assert_eq!(asir[0].start_date, "2025-01-01");
        assert_eq!(asir[0].images, vec!["slides/abdullah_alnaser.jpg"]);
        assert_eq!(asir[0].cv, "");

        let bahah = &doc.regions["SA-11"].employees;
        assert_eq!(bahah[0].id, "emp002");
        assert!(bahah[0].images.is_empty());

        let makkah = &doc.regions["SA-02"].employees;
        assert_eq!(makkah.len(), 1, "previous list is replaced");
        assert_eq!(makkah[0].id, "emp003");
        assert!(makkah[0].extra.is_empty());
        assert_eq!(doc.regions["SA-02"].fields["color"], "#1f77b4");
    }

    #[test]
    fn test_regions_without_employees_are_emptied() {
        let mut doc: RegionsDocument = serde_json::from_str(REGIONS_JSON).unwrap();
        let report = merge_employees(&mut doc, &[], &LookupTables::default(), &MergeOptions::default());

        assert_eq!(report.total_placed(), 0);
        assert_eq!(report.placed.len(), 3);
        assert!(doc.regions.values().all(|r| r.employees.is_empty()));
        assert_eq!(doc.metadata.total_employees, 0);
        assert_eq!(doc.metadata.total_regions, 0);
    }

    #[test]
    fn test_sheet_start_date_is_kept() {
        let mut doc: RegionsDocument = serde_json::from_str(REGIONS_JSON).unwrap();
        let mut employee = sheet("سعيد القاضي", Some("منطقة الباحة"), None);
        employee.starting_date = Some("2024-03-10".to_string());

        merge_employees(&mut doc, &[employee], &LookupTables::default(), &MergeOptions::default());
        assert_eq!(doc.regions["SA-11"].employees[0].start_date, "2024-03-10");
    }
}
