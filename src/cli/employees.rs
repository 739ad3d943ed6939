//! # build-employees subcommand
//!
//! Reads the candidate spreadsheet, pairs each employee with a photo and
//! writes `employees.json`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use super::RULE;
use crate::config::Config;
use crate::roster::{assign_photos, available_photos, employees_from_rows, save_sheet_employees};
use crate::xlsx::read_data_rows;

/// Arguments for the build-employees subcommand.
#[derive(Args, Debug)]
pub struct BuildEmployeesArgs {
    /// Spreadsheet export (defaults to the configured spreadsheet).
    #[arg(long)]
    pub spreadsheet: Option<PathBuf>,

    /// Directory of photos to match (defaults to the configured slides directory).
    #[arg(long)]
    pub slides_dir: Option<PathBuf>,

    /// Output file (defaults to the configured employees file).
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the build-employees subcommand.
pub fn run_build_employees(args: &BuildEmployeesArgs, config: &Config) -> Result<u8> {
    let spreadsheet = args
        .spreadsheet
        .clone()
        .unwrap_or_else(|| config.paths.spreadsheet.clone());
    let slides_dir = args
        .slides_dir
        .clone()
        .unwrap_or_else(|| config.paths.slides_dir.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.paths.employees_json.clone());

    if !spreadsheet.is_file() {
        bail!("spreadsheet not found: {}", spreadsheet.display());
    }

    println!("Extracting employee data from spreadsheet...");
    println!("{}", RULE);

    let rows = read_data_rows(&spreadsheet, config.paths.scratch_root.as_deref())
        .with_context(|| format!("reading {}", spreadsheet.display()))?;
    let mut employees = employees_from_rows(&rows, &config.sheet);

    let photos = if slides_dir.is_dir() {
        available_photos(
            &slides_dir,
            &config.photos.rename.extensions,
            &config.photos.match_exclude_prefix,
        )?
    } else {
        tracing::warn!(dir = %slides_dir.display(), "slides directory not found, no photos to match");
        Vec::new()
    };

    println!("Found {} employees in spreadsheet", employees.len());
    println!("Found {} profile pictures", photos.len());
    println!();

    let matched = assign_photos(&mut employees, &photos, &config.tables);
    for employee in &employees {
        let name = employee.name_ar.as_deref().unwrap_or_default();
        match employee.profile_picture.as_deref() {
            Some(photo) => println!("✓ {:30} -> {}", name, photo),
            None => println!("  {:30} (no match)", name),
        }
    }

    println!();
    println!("{}", RULE);
    println!(
        "Matched {}/{} employees to profile pictures",
        matched,
        employees.len()
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    save_sheet_employees(&output, &employees)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("✓ JSON file created: {}", output.display());
    println!("Total employees: {}", employees.len());
    Ok(0)
}
