//! Slide deck (.pptx) photo extraction.

pub mod extractor;
pub mod slide;

pub use extractor::{
    BatchFailure, BatchReport, ExtractOptions, ExtractOutcome, ExtractedImage, ImageSelector,
    MissingImage, extract_all_images, extract_directory, extract_image,
};
pub use slide::{BlipRef, BlipRefs, collect_blip_refs};
