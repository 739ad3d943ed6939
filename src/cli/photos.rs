//! # Photo subcommands
//!
//! `extract-photos` pulls one photo out of every deck, `extract-all` dumps
//! every image of a single deck for manual inspection, and `rename-photos`
//! brings the extracted files into canonical form.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use super::{RULE, format_size};
use crate::config::Config;
use crate::pptx::{self, ImageSelector};
use crate::roster::{RenameAction, rename_photos};

/// Arguments for the extract-photos subcommand.
#[derive(Args, Debug)]
pub struct ExtractPhotosArgs {
    /// Directory of decks (defaults to the configured slides directory).
    #[arg(long)]
    pub slides_dir: Option<PathBuf>,

    /// Directory receiving the photos (defaults to the slides directory).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Extract the N-th picture of the first slide instead of the first one.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "media_ordinal")]
    pub ordinal: Option<u32>,

    /// Extract the N-th image of the deck's media folder, sorted by name.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub media_ordinal: Option<u32>,
}

impl ExtractPhotosArgs {
    fn selector(&self, config: &Config) -> ImageSelector {
        match (self.ordinal, self.media_ordinal) {
            (_, Some(n)) => ImageSelector::MediaAt(n as usize),
            (Some(n), None) => ImageSelector::ReferenceAt(n as usize),
            (None, None) => config.image_selector(),
        }
    }
}

/// Arguments for the extract-all subcommand.
#[derive(Args, Debug)]
pub struct ExtractAllArgs {
    /// Deck whose images are exported.
    pub document: PathBuf,

    /// Directory receiving the images (defaults to the slides directory).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the rename-photos subcommand.
#[derive(Args, Debug)]
pub struct RenamePhotosArgs {
    /// Directory of photos (defaults to the configured slides directory).
    #[arg(long)]
    pub slides_dir: Option<PathBuf>,
}

/// Execute the extract-photos subcommand.
pub fn run_extract_photos(args: &ExtractPhotosArgs, config: &Config) -> Result<u8> {
    let slides_dir = args
        .slides_dir
        .clone()
        .unwrap_or_else(|| config.paths.slides_dir.clone());
    let output_dir = args.output_dir.clone().unwrap_or_else(|| slides_dir.clone());
    if !slides_dir.is_dir() {
        bail!("slides directory not found: {}", slides_dir.display());
    }
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let options = config.extract_options(&output_dir);
    let report = pptx::extract_directory(&slides_dir, args.selector(config), &options)
        .with_context(|| format!("reading {}", slides_dir.display()))?;

    println!("Found {} PPTX files", report.total);
    println!("{}", "-".repeat(60));
    for image in &report.extracted {
        println!(
            "✓ Extracted: {} ({})",
            file_name(&image.path),
            format_size(image.size)
        );
    }
    println!("{}", "-".repeat(60));
    println!("Extraction complete:");
    println!("  Success: {}/{}", report.extracted.len(), report.total);
    if !report.failures.is_empty() {
        println!("  Failed: {}", report.failures.len());
        for failure in &report.failures {
            println!("    - {} ({})", failure.document, failure.reason);
        }
    }

    Ok(if report.all_succeeded() { 0 } else { 1 })
}

/// Execute the extract-all subcommand.
pub fn run_extract_all(args: &ExtractAllArgs, config: &Config) -> Result<u8> {
    if !args.document.is_file() {
        bail!("file not found: {}", args.document.display());
    }
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.paths.slides_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    println!("Extracting all images from: {}", file_name(&args.document));
    println!("{}", RULE);

    let images = pptx::extract_all_images(&args.document, &config.extract_options(&output_dir))
        .with_context(|| format!("processing {}", args.document.display()))?;

    if images.is_empty() {
        println!("✗ No images were extracted");
        return Ok(1);
    }

    for (idx, image) in images.iter().enumerate() {
        println!(
            "  {}. {} ({})",
            idx + 1,
            file_name(&image.path),
            format_size(image.size)
        );
    }
    println!("{}", "-".repeat(60));
    println!("Extracted {} images to {}", images.len(), output_dir.display());
    println!("Review the images and set the profile picture number as photos.media_ordinal.");
    Ok(0)
}

/// Execute the rename-photos subcommand.
pub fn run_rename_photos(args: &RenamePhotosArgs, config: &Config) -> Result<u8> {
    let slides_dir = args
        .slides_dir
        .clone()
        .unwrap_or_else(|| config.paths.slides_dir.clone());
    if !slides_dir.is_dir() {
        bail!("slides directory not found: {}", slides_dir.display());
    }

    let report = rename_photos(&slides_dir, &config.photos.rename)
        .with_context(|| format!("reading {}", slides_dir.display()))?;
    if report.candidates() == 0 {
        println!("No profile pictures found to rename.");
        return Ok(1);
    }

    println!("Renaming {} profile pictures", report.candidates());
    println!("{}", RULE);
    for action in &report.actions {
        match action {
            RenameAction::Renamed { from, to } => {
                println!("  ✓ {}", from);
                println!("    -> {}", to);
            },
            RenameAction::Unchanged(name) => println!("  ↔ {} (no change)", name),
            RenameAction::TargetExists { from, to } => {
                println!("  ✗ Cannot rename {} -> {} (target exists)", from, to)
            },
            RenameAction::Failed { from, error } => {
                println!("  ✗ Error renaming {}: {}", from, error)
            },
        }
    }
    println!("{}", RULE);
    println!(
        "Rename complete: {}/{} files renamed",
        report.renamed(),
        report.candidates()
    );
    Ok(0)
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
