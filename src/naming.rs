//! File naming rules for photos.
//!
//! Extracted photos are named after the deck they came from; the rename step
//! then brings every photo name into one canonical form.

/// Split `name` into stem and extension (with its dot).
///
/// The extension is the suffix after the last dot when that suffix is
/// non-empty and alphanumeric. A leading dot does not start an extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if dot > 0 => {
            let suffix = &name[dot + 1..];
            if !suffix.is_empty() && suffix.chars().all(char::is_alphanumeric) {
                (&name[..dot], &name[dot..])
            } else {
                (name, "")
            }
        },
        _ => (name, ""),
    }
}

/// Canonical photo filename: lowercase, spaces become underscores, dashes are
/// removed, and the extension is lowercased.
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize_filename(name: &str) -> String {
    let (stem, ext) = split_extension(name);

    let mut normalized = String::with_capacity(name.len());
    for ch in stem.to_lowercase().chars() {
        match ch {
            ' ' => normalized.push('_'),
            '-' => {},
            other => normalized.push(other),
        }
    }
    normalized.push_str(&ext.to_lowercase());
    normalized
}

/// Human-readable name of a document: its stem without the boilerplate
/// `prefix`, trimmed.
pub fn display_name(stem: &str, prefix: &str) -> String {
    let stripped = if prefix.is_empty() {
        stem
    } else {
        stem.strip_prefix(prefix).unwrap_or(stem)
    };
    stripped.trim().to_string()
}

/// Output name for the `index`-th (1-based) image of a document when all of
/// its images are exported.
pub fn numbered_image_name(display: &str, index: usize, ext: &str) -> String {
    format!("{}-image-{}{}", display.replace(' ', "-"), index, ext)
}

/// Whether `name` ends with one of `extensions` (given without the dot),
/// ignoring ASCII case.
pub fn has_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let (_, ext) = split_extension(name);
    let Some(ext) = ext.strip_prefix('.') else {
        return false;
    };
    extensions
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
}
