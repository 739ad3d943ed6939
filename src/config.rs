//! Configuration file support.
//!
//! Every setting has a built-in default, so a configuration file only needs
//! the values it changes:
//!
//! ```yaml
//! paths:
//!   slides_dir: slides
//!   regions_json: data/regions.json
//! sheet:
//!   start_date: H
//! tables:
//!   titles:
//!     مستشار: Advisor
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::pptx::{ExtractOptions, ImageSelector};
use crate::roster::{MergeOptions, RenameRules, SheetColumns};
use crate::tables::LookupTables;

/// File looked up in the working directory when no configuration is given.
pub const DEFAULT_CONFIG_FILE: &str = "roster-prep.yaml";

/// Input and output locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the decks and the photos extracted from them
    pub slides_dir: PathBuf,
    pub spreadsheet: PathBuf,
    pub employees_json: PathBuf,
    pub regions_json: PathBuf,
    /// Parent of scratch directories; the system temporary directory if unset
    pub scratch_root: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            slides_dir: PathBuf::from("slides"),
            spreadsheet: PathBuf::from("slides/candidates.xlsx"),
            employees_json: PathBuf::from("employees.json"),
            regions_json: PathBuf::from("data/regions.json"),
            scratch_root: None,
        }
    }
}

/// Photo extraction and naming.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    /// Boilerplate prefix of deck names, stripped from output names
    pub document_prefix: String,
    /// Photos starting with this prefix are not offered for matching
    pub match_exclude_prefix: String,
    /// 1-based picture of slide one to extract
    pub ordinal: Option<usize>,
    /// 1-based image of the media directory to extract instead
    pub media_ordinal: Option<usize>,
    pub rename: RenameRules,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            document_prefix: "Welcome onboard -".to_string(),
            match_exclude_prefix: "Welcome".to_string(),
            ordinal: None,
            media_ordinal: None,
            rename: RenameRules::default(),
        }
    }
}

/// Image path maintenance of the regions file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub placeholder: String,
    pub rewrite_from: String,
    pub rewrite_to: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            placeholder: "images/placeholder-avatar.svg".to_string(),
            rewrite_from: "slides/".to_string(),
            rewrite_to: "images/".to_string(),
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub photos: PhotosConfig,
    pub sheet: SheetColumns,
    pub merge: MergeOptions,
    pub images: ImagesConfig,
    pub tables: LookupTables,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and the built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate YAML configuration text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_saphyr::from_str(content)
                .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.sheet.validate()?;
        if self.photos.ordinal == Some(0) || self.photos.media_ordinal == Some(0) {
            return Err(Error::Config("image ordinals start at 1".to_string()));
        }
        if self.photos.ordinal.is_some() && self.photos.media_ordinal.is_some() {
            return Err(Error::Config(
                "set at most one of photos.ordinal and photos.media_ordinal".to_string(),
            ));
        }
        Ok(())
    }

    /// Image selection configured for batch extraction.
    pub fn image_selector(&self) -> ImageSelector {
        match (self.photos.ordinal, self.photos.media_ordinal) {
            (_, Some(n)) => ImageSelector::MediaAt(n),
            (Some(n), None) => ImageSelector::ReferenceAt(n),
            (None, None) => ImageSelector::FirstReference,
        }
    }

    /// Extraction options writing into `output_dir`.
    pub fn extract_options(&self, output_dir: &Path) -> ExtractOptions {
        ExtractOptions {
            output_dir: output_dir.to_path_buf(),
            document_prefix: self.photos.document_prefix.clone(),
            scratch_root: self.paths.scratch_root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Translator;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.paths.slides_dir, PathBuf::from("slides"));
        assert_eq!(config.sheet, SheetColumns::default());
        assert_eq!(config.merge.default_start_date, "2025-01-01");
        assert_eq!(config.images.placeholder, "images/placeholder-avatar.svg");
        assert_eq!(config.image_selector(), ImageSelector::FirstReference);
        assert_eq!(config.tables.titles.len(), 22);
    }

    #[test]
    fn test_partial_config_overrides_only_given_values() {
        let yaml = r#"
paths:
  regions_json: site/regions.json
sheet:
  start_date: H
photos:
  media_ordinal: 7
tables:
  titles:
    مستشار: Advisor
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.paths.regions_json, PathBuf::from("site/regions.json"));
        assert_eq!(config.paths.employees_json, PathBuf::from("employees.json"));
        assert_eq!(config.sheet.start_date, "H");
        assert_eq!(config.sheet.name, "B");
        assert_eq!(config.image_selector(), ImageSelector::MediaAt(7));

        assert_eq!(config.tables.titles.len(), 1, "a given table replaces the default");
        assert_eq!(config.tables.translate_title("مستشار"), "Advisor");
        assert_eq!(config.tables.translate_name("سعيد القاضي"), "Saeed Al Qadi");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            Config::from_yaml("sheet:\n  name: \"2\"\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("photos:\n  ordinal: 0\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_yaml("paths: [1, 2"), Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.yaml").as_path())).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_config_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster-prep.yaml");
        std::fs::write(&path, "images:\n  placeholder: img/none.svg\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.images.placeholder, "img/none.svg");
        assert_eq!(config.images.rewrite_to, "images/");
    }
}
