//! Spreadsheet rows to [`SheetEmployee`] records.

use serde::Deserialize;

use super::model::SheetEmployee;
use crate::error::{Error, Result};
use crate::xlsx::cell::letters_to_column;
use crate::xlsx::{RowRecord, format_date_cell};

/// Which spreadsheet column holds each employee field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetColumns {
    pub name: String,
    pub title: String,
    pub city: String,
    pub province: String,
    pub start_date: String,
    /// Name cell of a header row that repeats below row 1
    pub header_label: String,
}

impl Default for SheetColumns {
    fn default() -> Self {
        Self {
            name: "B".to_string(),
            title: "C".to_string(),
            city: "D".to_string(),
            province: "E".to_string(),
            start_date: "G".to_string(),
            header_label: "الاسم".to_string(),
        }
    }
}

impl SheetColumns {
    /// Reject column names that are not spreadsheet column letters.
    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("name", &self.name),
            ("title", &self.title),
            ("city", &self.city),
            ("province", &self.province),
            ("start_date", &self.start_date),
        ];
        for (field, letters) in columns {
            if letters_to_column(letters).is_none() {
                return Err(Error::Config(format!(
                    "column for {} must be letters like \"B\", got {:?}",
                    field, letters
                )));
            }
        }
        Ok(())
    }
}

/// Map data rows to employees.
///
/// Rows without a name are skipped. When the first remaining row is a repeat
/// of the header (its name is the header label) it is dropped. Start dates
/// are decoded from date serials.
pub fn employees_from_rows(rows: &[RowRecord], columns: &SheetColumns) -> Vec<SheetEmployee> {
    let mut employees: Vec<SheetEmployee> = rows
        .iter()
        .filter_map(|row| {
            let name = row.non_empty(&columns.name)?;
            Some(SheetEmployee {
                name_ar: Some(name.to_string()),
                title: row.get(&columns.title).map(str::to_string),
                city: row.get(&columns.city).map(str::to_string),
                province: row.get(&columns.province).map(str::to_string),
                starting_date: format_date_cell(row.get(&columns.start_date)),
                profile_picture: None,
            })
        })
        .collect();

    if employees
        .first()
        .is_some_and(|first| first.name_ar.as_deref() == Some(columns.header_label.as_str()))
    {
        employees.remove(0);
    }

    employees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: u32, cells: &[(u32, &str)]) -> RowRecord {
        let mut record = RowRecord::new(number);
        for (column, text) in cells {
            record.cells.insert(*column, text.to_string());
        }
        record
    }

    #[test]
    fn test_rows_map_to_employees() {
        let rows = vec![
            row(2, &[(2, "الاسم"), (3, "المسمى")]),
            row(3, &[(1, "1"), (2, "سعيد القاضي"), (3, "مستشار"), (4, "الباحة"), (5, "منطقة الباحة"), (7, "45292")]),
            row(4, &[(1, "2"), (3, "مستشار")]),
            row(5, &[(2, ""), (3, "مستشار")]),
            row(6, &[(2, "وليد النفيعي"), (7, "قريبا")]),
        ];

        let employees = employees_from_rows(&rows, &SheetColumns::default());
        assert_eq!(employees.len(), 2);

        let first = &employees[0];
        assert_eq!(first.name_ar.as_deref(), Some("سعيد القاضي"));
        assert_eq!(first.title.as_deref(), Some("مستشار"));
        assert_eq!(first.city.as_deref(), Some("الباحة"));
        assert_eq!(first.province.as_deref(), Some("منطقة الباحة"));
        assert_eq!(first.starting_date.as_deref(), Some("2024-01-01"));
        assert_eq!(first.profile_picture, None);

        let second = &employees[1];
        assert_eq!(second.province, None);
        assert_eq!(second.starting_date.as_deref(), Some("قريبا"));
    }

    #[test]
    fn test_header_label_only_dropped_when_leading() {
        let rows = vec![row(2, &[(2, "سعيد القاضي")]), row(3, &[(2, "الاسم")])];
        let employees = employees_from_rows(&rows, &SheetColumns::default());
        assert_eq!(employees.len(), 2);
    }

    #[test]
    fn test_validate_columns() {
        assert!(SheetColumns::default().validate().is_ok());
        let bad = SheetColumns {
            city: "4".to_string(),
            ..SheetColumns::default()
        };
        assert!(matches!(bad.validate(), Err(Error::Config(_))));
    }
}
