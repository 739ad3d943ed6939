//! Pairing employees with their photo files.
//!
//! Matching is a table lookup: an employee's name gives a filename fragment,
//! and the first available photo containing that fragment is theirs.

use std::path::Path;

use super::model::SheetEmployee;
use crate::error::Result;
use crate::naming::has_extension;
use crate::tables::LookupTables;

/// Photo files in `dir` eligible for matching, sorted by name.
///
/// Files whose names start with `exclude_prefix` (the decks' own naming) are
/// left out.
pub fn available_photos<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
    exclude_prefix: &str,
) -> Result<Vec<String>> {
    let mut photos = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if has_extension(&name, extensions)
            && (exclude_prefix.is_empty() || !name.starts_with(exclude_prefix))
        {
            photos.push(name);
        }
    }
    photos.sort();
    Ok(photos)
}

/// The photo of the employee called `name`, if the tables know a hint for it
/// and some photo contains the hint.
pub fn match_photo<'a>(name: &str, photos: &'a [String], tables: &LookupTables) -> Option<&'a str> {
    let hint = tables.photo_hint(name)?;
    photos
        .iter()
        .find(|photo| photo.contains(hint))
        .map(String::as_str)
}

/// Fill in `profile_picture` for every employee that has a matching photo.
///
/// Returns the number of matched employees.
pub fn assign_photos(employees: &mut [SheetEmployee], photos: &[String], tables: &LookupTables) -> usize {
    let mut matched = 0;
    for employee in employees.iter_mut() {
        let Some(name) = employee.name_ar.as_deref() else {
            continue;
        };
        match match_photo(name, photos, tables) {
            Some(photo) => {
                tracing::debug!(employee = name, photo, "matched photo");
                employee.profile_picture = Some(photo.to_string());
                matched += 1;
            },
            None => tracing::debug!(employee = name, "no photo match"),
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_photos_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "waleed_alnufaii.png",
            "abdullah_alnaser.JPG",
            "Welcome onboard - Abdullah Alnaser.jpeg",
            "Welcome onboard - Abdullah Alnaser.pptx",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let photos = available_photos(dir.path(), &["jpg", "jpeg", "png"], "Welcome").unwrap();
        assert_eq!(photos, vec!["abdullah_alnaser.JPG", "waleed_alnufaii.png"]);
    }

    #[test]
    fn test_match_uses_first_photo_containing_hint() {
        let tables = LookupTables::default();
        let photos = vec![
            "khalid_alqahtani.jpg".to_string(),
            "khalid_alzahrani.jpg".to_string(),
            "waleed_alnufaii.png".to_string(),
        ];

        assert_eq!(
            match_photo("خالد الزهراني", &photos, &tables),
            Some("khalid_alqahtani.jpg"),
            "a short hint takes the first photo that contains it"
        );
        assert_eq!(match_photo("وليد النفيعي", &photos, &tables), Some("waleed_alnufaii.png"));
        assert_eq!(match_photo("فهد السحيباني", &photos, &tables), None);
        assert_eq!(match_photo("اسم غير معروف", &photos, &tables), None);
    }

    #[test]
    fn test_assign_photos_counts_matches() {
        let tables = LookupTables::default();
        let photos = vec!["saeed_alqadi.jpeg".to_string()];
        let mut employees = vec![
            SheetEmployee {
                name_ar: Some("سعيد القاضي".into()),
                ..SheetEmployee::default()
            },
            SheetEmployee {
                name_ar: Some("وليد النفيعي".into()),
                ..SheetEmployee::default()
            },
        ];

        assert_eq!(assign_photos(&mut employees, &photos, &tables), 1);
        assert_eq!(employees[0].profile_picture.as_deref(), Some("saeed_alqadi.jpeg"));
        assert_eq!(employees[1].profile_picture, None);
    }
}
