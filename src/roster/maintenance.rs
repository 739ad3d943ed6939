//! In-place fixes to the image lists of a regions file.

use super::model::RegionsDocument;

/// Give every employee without images the `placeholder` image.
///
/// Returns the number of employees updated.
pub fn add_placeholders(document: &mut RegionsDocument, placeholder: &str) -> usize {
    let mut updated = 0;
    for employee in document.employees_mut() {
        if employee.images.is_empty() {
            employee.images.push(placeholder.to_string());
            tracing::info!(employee = %employee.name, "added placeholder");
            updated += 1;
        }
    }
    updated
}

/// Rewrite image paths starting with `from` to start with `to` instead.
///
/// Returns the number of paths rewritten.
pub fn rewrite_image_prefix(document: &mut RegionsDocument, from: &str, to: &str) -> usize {
    if from.is_empty() {
        return 0;
    }

    let mut rewritten = 0;
    for employee in document.employees_mut() {
        for path in employee.images.iter_mut() {
            if let Some(rest) = path.strip_prefix(from) {
                *path = format!("{}{}", to, rest);
                rewritten += 1;
            }
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::model::fixtures::REGIONS_JSON;

    fn document() -> RegionsDocument {
        serde_json::from_str(REGIONS_JSON).unwrap()
    }

    #[test]
    fn test_placeholder_fills_empty_lists_only() {
        let mut doc = document();
        assert_eq!(add_placeholders(&mut doc, "images/placeholder-avatar.svg"), 1);
        assert_eq!(
            doc.regions["SA-11"].employees[0].images,
            vec!["images/placeholder-avatar.svg"]
        );
        assert_eq!(doc.regions["SA-02"].employees[0].images, vec!["slides/khalid.jpg"]);
    }

    #[test]
    fn test_placeholder_on_populated_file_updates_nothing() {
        let mut doc = document();
        add_placeholders(&mut doc, "images/placeholder-avatar.svg");
        let before = doc.clone();

        assert_eq!(add_placeholders(&mut doc, "images/placeholder-avatar.svg"), 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_rewrite_image_prefix() {
        let mut doc = document();
        add_placeholders(&mut doc, "images/placeholder-avatar.svg");

        assert_eq!(rewrite_image_prefix(&mut doc, "slides/", "images/"), 1);
        assert_eq!(doc.regions["SA-02"].employees[0].images, vec!["images/khalid.jpg"]);
        assert_eq!(
            doc.regions["SA-11"].employees[0].images,
            vec!["images/placeholder-avatar.svg"]
        );
        assert_eq!(rewrite_image_prefix(&mut doc, "slides/", "images/"), 0);
    }
}
