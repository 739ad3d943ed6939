//! roster-prep - data preparation for a regional employee directory
//!
//! The directory is published from two sources: a spreadsheet export of the
//! candidates and a folder of onboarding decks, one per employee, each
//! carrying the employee's photo. This crate turns them into the JSON files
//! the site reads.
//!
//! # Features
//!
//! - **Photo extraction**: copy the profile picture out of every `.pptx` deck
//! - **Spreadsheet export**: read the primary worksheet of an `.xlsx` file,
//!   resolving shared strings and date serial numbers
//! - **Translation tables**: Arabic names, titles and provinces to English
//! - **Region merge**: place employees into the regions file and keep its
//!   counters consistent
//!
//! # Example - Merging employees into regions
//!
//! ```no_run
//! use roster_prep::roster::{load_sheet_employees, merge_employees, MergeOptions, RegionsDocument};
//! use roster_prep::tables::LookupTables;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let employees = load_sheet_employees("employees.json")?;
//! let mut regions = RegionsDocument::load("data/regions.json")?;
//!
//! let report = merge_employees(&mut regions, &employees, &LookupTables::default(), &MergeOptions::default());
//! println!("placed {} employees", report.total_placed());
//!
//! regions.save("data/regions.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Extracting a photo
//!
//! ```no_run
//! use roster_prep::pptx::{extract_image, ExtractOptions, ExtractOutcome, ImageSelector};
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ExtractOptions {
//!     output_dir: PathBuf::from("slides"),
//!     document_prefix: "Welcome onboard -".to_string(),
//!     scratch_root: None,
//! };
//! let deck = Path::new("slides/Welcome onboard - Abdullah Alnaser.pptx");
//!
//! match extract_image(deck, ImageSelector::MediaAt(7), &options)? {
//!     ExtractOutcome::Extracted(image) => println!("wrote {}", image.path.display()),
//!     ExtractOutcome::Missing(reason) => println!("no photo: {}", reason),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod naming;

/// Packaged document (ZIP container) access
///
/// Pack URIs, relationship files and scratch unpacking shared by the
/// spreadsheet and deck readers.
pub mod opc;

/// Slide deck photo extraction
pub mod pptx;

/// Employee records, region merge and regions file maintenance
pub mod roster;

/// Lookup tables for names, titles and provinces
pub mod tables;

/// Spreadsheet row extraction
pub mod xlsx;

pub use config::Config;
pub use error::{Error, Result};
