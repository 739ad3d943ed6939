//! Bringing photo filenames into canonical form.

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use crate::naming::{has_extension, normalize_filename};

/// Which files of a directory the rename step touches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenameRules {
    /// Extensions (without the dot) of files to rename, any case
    pub extensions: Vec<String>,
    /// Files starting with one of these are left alone
    pub excluded_prefixes: Vec<String>,
}

impl Default for RenameRules {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            excluded_prefixes: vec!["Welcome onboard".into(), "صورة".into()],
        }
    }
}

impl RenameRules {
    fn applies_to(&self, name: &str) -> bool {
        has_extension(name, &self.extensions)
            && !self
                .excluded_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
    }
}

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameAction {
    Renamed { from: String, to: String },
    Unchanged(String),
    TargetExists { from: String, to: String },
    Failed { from: String, error: String },
}

/// Per-file results of a rename run, in filename order.
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub actions: Vec<RenameAction>,
}

impl RenameReport {
    pub fn renamed(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, RenameAction::Renamed { .. }))
            .count()
    }

    pub fn candidates(&self) -> usize {
        self.actions.len()
    }
}

/// Rename every matching file of `dir` to its normalized name.
///
/// An existing file is never overwritten. Failures are recorded per file and
/// the run continues.
pub fn rename_photos(dir: &Path, rules: &RenameRules) -> Result<RenameReport> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if rules.applies_to(&name) {
            candidates.push(name);
        }
    }
    candidates.sort();

    let mut report = RenameReport::default();
    for from in candidates {
        let to = normalize_filename(&from);
        if to == from {
            report.actions.push(RenameAction::Unchanged(from));
            continue;
        }

        let target = dir.join(&to);
        if target.exists() {
            tracing::warn!(from = %from, to = %to, "target exists, not renaming");
            report.actions.push(RenameAction::TargetExists { from, to });
            continue;
        }

        match std::fs::rename(dir.join(&from), &target) {
            Ok(()) => {
                tracing::info!(from = %from, to = %to, "renamed photo");
                report.actions.push(RenameAction::Renamed { from, to });
            },
            Err(e) => {
                tracing::error!(from = %from, "error renaming: {}", e);
                report.actions.push(RenameAction::Failed {
                    from,
                    error: e.to_string(),
                });
            },
        }
    }

    Ok(report)
}
