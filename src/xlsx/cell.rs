//! Cell references and row records for Excel worksheets.

use std::collections::HashMap;

/// One worksheet row: the text of each non-empty cell, keyed by 1-based column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    /// Row number (1-based)
    pub row: u32,
    /// Cell text by column number (1-based)
    pub cells: HashMap<u32, String>,
}

impl RowRecord {
    /// Create an empty row.
    pub fn new(row: u32) -> Self {
        Self {
            row,
            cells: HashMap::new(),
        }
    }

    /// Get the text of the cell in column `letters` (e.g. "B").
    pub fn get(&self, letters: &str) -> Option<&str> {
        let column = letters_to_column(letters)?;
        self.cells.get(&column).map(String::as_str)
    }

    /// Get the text of a cell, treating empty text as absent.
    pub fn non_empty(&self, letters: &str) -> Option<&str> {
        self.get(letters).filter(|text| !text.is_empty())
    }
}

/// Convert column letters to a 1-based column number (A=1, Z=26, AA=27).
///
/// Returns `None` for empty or non-alphabetic input.
pub fn letters_to_column(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut col_num = 0u32;
    for byte in letters.bytes() {
        if !byte.is_ascii_alphabetic() {
            return None;
        }
        col_num = col_num
            .checked_mul(26)?
            .checked_add((byte.to_ascii_uppercase() - b'A' + 1) as u32)?;
    }
    Some(col_num)
}

/// Convert an Excel reference (e.g., "B12") to `(column, row)` numbers.
///
/// The row part may be missing ("B"), in which case it is reported as 0.
pub fn reference_to_coords(reference: &str) -> Option<(u32, u32)> {
    let split = reference
        .bytes()
        .position(|b| b.is_ascii_digit())
        .unwrap_or(reference.len());

    let column = letters_to_column(&reference[..split])?;
    let row_part = &reference.as_bytes()[split..];
    let row = if row_part.is_empty() {
        0
    } else {
        atoi_simd::parse_pos::<u32, false>(row_part).ok()?
    };

    Some((column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A"), Some(1));
        assert_eq!(letters_to_column("Z"), Some(26));
        assert_eq!(letters_to_column("AA"), Some(27));
        assert_eq!(letters_to_column("g"), Some(7));
        assert_eq!(letters_to_column(""), None);
        assert_eq!(letters_to_column("B2"), None);
    }

    #[test]
    fn test_reference_to_coords() {
        assert_eq!(reference_to_coords("B12"), Some((2, 12)));
        assert_eq!(reference_to_coords("AB3"), Some((28, 3)));
        assert_eq!(reference_to_coords("C"), Some((3, 0)));
        assert_eq!(reference_to_coords("12"), None);
    }

    #[test]
    fn test_row_record_lookup() {
        let mut row = RowRecord::new(4);
        row.cells.insert(2, "سعيد القاضي".to_string());
        row.cells.insert(3, String::new());

        assert_eq!(row.get("B"), Some("سعيد القاضي"));
        assert_eq!(row.get("C"), Some(""));
        assert_eq!(row.non_empty("C"), None);
        assert_eq!(row.get("Z"), None);
    }
}
