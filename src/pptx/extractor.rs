//! Photo extraction from slide decks.
//!
//! Each deck is unpacked into its own scratch directory, the requested image
//! is located through the first slide's relationships (or by its position in
//! the media directory) and copied next to the other photos. A deck whose
//! structure does not lead to an image is not an error: the caller gets
//! [`ExtractOutcome::Missing`] with the reason, and a warning is logged.

use std::fmt;
use std::path::{Path, PathBuf};

use super::slide::collect_blip_refs;
use crate::error::Result as CrateResult;
use crate::naming::{display_name, has_extension, numbered_image_name, split_extension};
use crate::opc::constants::{IMAGE_EXTENSIONS, pptx};
use crate::opc::error::{OpcError, Result};
use crate::opc::{PackURI, UnpackedPackage};

/// Which image of a deck to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSelector {
    /// First picture placed on slide one
    #[default]
    FirstReference,
    /// N-th (1-based) picture placed on slide one
    ReferenceAt(usize),
    /// N-th (1-based) image file of the media directory, sorted by name
    MediaAt(usize),
}

/// Where extracted images go and how they are named.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory receiving the copied images
    pub output_dir: PathBuf,
    /// Boilerplate prefix stripped from deck names
    pub document_prefix: String,
    /// Parent of the per-deck scratch directories (system temp when `None`)
    pub scratch_root: Option<PathBuf>,
}

/// An image copied out of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub path: PathBuf,
    pub size: u64,
}

/// Why a deck produced no image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingImage {
    NoSlide,
    NoPictures,
    NoRelationshipId,
    NoRelationships,
    UnresolvedId(String),
    NoMediaDir,
    OrdinalOutOfRange { ordinal: usize, available: usize },
    PartMissing(String),
}

impl fmt::Display for MissingImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingImage::NoSlide => write!(f, "first slide not found"),
            MissingImage::NoPictures => write!(f, "no images found"),
            MissingImage::NoRelationshipId => write!(f, "picture has no relationship ID"),
            MissingImage::NoRelationships => write!(f, "first slide has no relationship file"),
            MissingImage::UnresolvedId(id) => write!(f, "relationship {} not found", id),
            MissingImage::NoMediaDir => write!(f, "no media folder found"),
            MissingImage::OrdinalOutOfRange { ordinal, available } => write!(
                f,
                "only {} images found, cannot extract image #{}",
                available, ordinal
            ),
            MissingImage::PartMissing(part) => write!(f, "image part {} not found", part),
        }
    }
}

/// Result of processing one deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Extracted(ExtractedImage),
    Missing(MissingImage),
}

/// A deck of a batch that produced no image.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub document: String,
    pub reason: String,
}

/// Summary of a batch run over a directory of decks.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub extracted: Vec<ExtractedImage>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extract the selected image of `document` into the output directory.
///
/// The copy is named after the deck's display name and keeps the extension of
/// the media part. Packaging and IO failures are returned as errors; a deck
/// that simply has no matching image yields [`ExtractOutcome::Missing`].
pub fn extract_image(
    document: &Path,
    selector: ImageSelector,
    options: &ExtractOptions,
) -> Result<ExtractOutcome> {
    let package = UnpackedPackage::unpack(document, options.scratch_root.as_deref())?;

    let located = match selector {
        ImageSelector::FirstReference => locate_by_reference(&package, 1)?,
        ImageSelector::ReferenceAt(ordinal) => locate_by_reference(&package, ordinal)?,
        ImageSelector::MediaAt(ordinal) => locate_by_media_order(&package, ordinal)?,
    };

    let part = match located {
        Ok(part) => part,
        Err(missing) => {
            tracing::warn!(document = %document_stem(document), "{}", missing);
            return Ok(ExtractOutcome::Missing(missing));
        },
    };

    let (_, ext) = split_extension(part.filename());
    let display = display_name(&document_stem(document), &options.document_prefix);
    let dest = options.output_dir.join(format!("{}{}", display, ext));
    let size = package.copy_member(&part, &dest)?;

    tracing::info!(
        document = %document_stem(document),
        part = %part,
        size,
        "extracted {}",
        dest.display()
    );

    Ok(ExtractOutcome::Extracted(ExtractedImage { path: dest, size }))
}

/// Copy every image of the deck's media directory, sorted by name, as
/// `<display-name>-image-<n><ext>`.
///
/// A deck without media yields an empty list and a warning.
pub fn extract_all_images(document: &Path, options: &ExtractOptions) -> Result<Vec<ExtractedImage>> {
    let package = UnpackedPackage::unpack(document, options.scratch_root.as_deref())?;
    let images = match media_images(&package)? {
        Ok(images) => images,
        Err(missing) => {
            tracing::warn!(document = %document_stem(document), "{}", missing);
            return Ok(Vec::new());
        },
    };

    let display = display_name(&document_stem(document), &options.document_prefix);
    let mut extracted = Vec::with_capacity(images.len());

    for (idx, part) in images.iter().enumerate() {
        let (_, ext) = split_extension(part.filename());
        let dest = options
            .output_dir
            .join(numbered_image_name(&display, idx + 1, ext));
        let size = package.copy_member(part, &dest)?;
        extracted.push(ExtractedImage { path: dest, size });
    }

    Ok(extracted)
}

/// Extract one image from every `.pptx` in `slides_dir`, in name order.
///
/// Per-deck errors are logged and recorded as failures; only a failure to list
/// the directory aborts the batch.
pub fn extract_directory(
    slides_dir: &Path,
    selector: ImageSelector,
    options: &ExtractOptions,
) -> CrateResult<BatchReport> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(slides_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pptx") {
            documents.push(path);
        }
    }
    documents.sort();

    tracing::info!(
        directory = %slides_dir.display(),
        documents = documents.len(),
        ?selector,
        "extracting photos"
    );

    let mut report = BatchReport {
        total: documents.len(),
        ..BatchReport::default()
    };

    for document in &documents {
        let name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match extract_image(document, selector, options) {
            Ok(ExtractOutcome::Extracted(image)) => report.extracted.push(image),
            Ok(ExtractOutcome::Missing(missing)) => report.failures.push(BatchFailure {
                document: name,
                reason: missing.to_string(),
            }),
            Err(e) => {
                tracing::error!(document = %name, "error processing deck: {}", e);
                report.failures.push(BatchFailure {
                    document: name,
                    reason: e.to_string(),
                });
            },
        }
    }

    Ok(report)
}

type Located = std::result::Result<PackURI, MissingImage>;

/// Follow the `ordinal`-th picture of slide one to its media part.
fn locate_by_reference(package: &UnpackedPackage, ordinal: usize) -> Result<Located> {
    let slide_uri = PackURI::new(pptx::FIRST_SLIDE).map_err(OpcError::InvalidPackUri)?;
    let Some(slide_xml) = package.optional_blob_for(&slide_uri)? else {
        return Ok(Err(MissingImage::NoSlide));
    };

    let refs = collect_blip_refs(&slide_xml)?;
    if refs.is_empty() {
        return Ok(Err(MissingImage::NoPictures));
    }
    let Some(blip) = ordinal.checked_sub(1).and_then(|idx| refs.get(idx)) else {
        return Ok(Err(MissingImage::OrdinalOutOfRange {
            ordinal,
            available: refs.len(),
        }));
    };
    let Some(r_id) = blip.r_id.as_deref() else {
        return Ok(Err(MissingImage::NoRelationshipId));
    };

    let Some(rels) = package.rels_for(&slide_uri)? else {
        return Ok(Err(MissingImage::NoRelationships));
    };
    let Some(rel) = rels.get(r_id) else {
        return Ok(Err(MissingImage::UnresolvedId(r_id.to_string())));
    };
    if rel.is_external() {
        return Ok(Err(MissingImage::PartMissing(rel.target_ref().to_string())));
    }

    let target = rel.target_partname()?;
    if !package.contains(&target) {
        return Ok(Err(MissingImage::PartMissing(target.to_string())));
    }
    Ok(Ok(target))
}

/// Pick the `ordinal`-th image file of the media directory.
fn locate_by_media_order(package: &UnpackedPackage, ordinal: usize) -> Result<Located> {
    let images = match media_images(package)? {
        Ok(images) => images,
        Err(missing) => return Ok(Err(missing)),
    };
    let available = images.len();
    Ok(ordinal
        .checked_sub(1)
        .and_then(|idx| images.into_iter().nth(idx))
        .ok_or(MissingImage::OrdinalOutOfRange { ordinal, available }))
}

/// Image parts of the media directory, sorted by name.
fn media_images(package: &UnpackedPackage) -> Result<std::result::Result<Vec<PackURI>, MissingImage>> {
    let media_dir = PackURI::new(pptx::MEDIA_DIR).map_err(OpcError::InvalidPackUri)?;
    let Some(files) = package.files_in(&media_dir)? else {
        return Ok(Err(MissingImage::NoMediaDir));
    };

    let images = files
        .iter()
        .filter(|name| has_extension(name, IMAGE_EXTENSIONS))
        .map(|name| PackURI::new(format!("{}/{}", pptx::MEDIA_DIR, name)))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(OpcError::InvalidPackUri)?;

    if images.is_empty() {
        return Ok(Err(MissingImage::NoPictures));
    }
    Ok(Ok(images))
}

fn document_stem(document: &Path) -> String {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
