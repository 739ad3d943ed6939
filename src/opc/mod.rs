/// Packaging layer for ZIP-based Office documents.
///
/// A packaged document is a ZIP container of XML parts, relationship files
/// (`_rels/*.rels`) that map short identifiers to other parts, and binary media
/// parts. This module provides:
///
/// - Pack URIs and relative-reference resolution
/// - Relationship file parsing
/// - Unpacking into a self-cleaning scratch directory
/// - Shared quick-xml helpers

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod rel;
pub mod xml;

pub use error::OpcError;
pub use package::UnpackedPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
