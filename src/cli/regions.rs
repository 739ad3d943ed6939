//! # Regions file subcommands
//!
//! `merge` places the employees of `employees.json` into their regions;
//! `add-placeholders` and `fix-image-paths` patch image lists in place.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;
use crate::roster::{
    RegionsDocument, UnmatchedReason, add_placeholders, load_sheet_employees, merge_employees,
    rewrite_image_prefix,
};

/// Arguments for the merge subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Employee list (defaults to the configured employees file).
    #[arg(long)]
    pub employees: Option<PathBuf>,

    /// Regions file to update (defaults to the configured regions file).
    #[arg(long)]
    pub regions: Option<PathBuf>,
}

/// Arguments shared by the subcommands that patch the regions file.
#[derive(Args, Debug)]
pub struct RegionsFileArgs {
    /// Regions file to update (defaults to the configured regions file).
    #[arg(long)]
    pub regions: Option<PathBuf>,
}

impl RegionsFileArgs {
    fn path(&self, config: &Config) -> PathBuf {
        self.regions
            .clone()
            .unwrap_or_else(|| config.paths.regions_json.clone())
    }
}

/// Execute the merge subcommand.
pub fn run_merge(args: &MergeArgs, config: &Config) -> Result<u8> {
    let employees_path = args
        .employees
        .clone()
        .unwrap_or_else(|| config.paths.employees_json.clone());
    let regions_path = args
        .regions
        .clone()
        .unwrap_or_else(|| config.paths.regions_json.clone());

    let employees = load_sheet_employees(&employees_path)
        .with_context(|| format!("reading {}", employees_path.display()))?;
    let mut document = RegionsDocument::load(&regions_path)
        .with_context(|| format!("reading {}", regions_path.display()))?;

    let report = merge_employees(&mut document, &employees, &config.tables, &config.merge);
    document
        .save(&regions_path)
        .with_context(|| format!("writing {}", regions_path.display()))?;

    println!("✓ Updated {}", regions_path.display());
    println!("  Total employees: {}", document.metadata.total_employees);
    println!(
        "  Total regions with employees: {}",
        document.metadata.total_regions
    );

    if !report.unmatched.is_empty() {
        println!();
        println!(
            "⚠ {} employees could not be matched to regions:",
            report.unmatched.len()
        );
        for unmatched in &report.unmatched {
            let name = unmatched.employee.name_ar.as_deref().unwrap_or_default();
            let province = unmatched.employee.province.as_deref().unwrap_or_default();
            match &unmatched.reason {
                UnmatchedReason::UnknownProvince => {
                    println!("  - {} (province: {})", name, province)
                },
                UnmatchedReason::RegionMissing(code) => println!(
                    "  - {} (province: {}, region {} not in file)",
                    name, province, code
                ),
            }
        }
    }

    Ok(0)
}

/// Execute the add-placeholders subcommand.
pub fn run_add_placeholders(args: &RegionsFileArgs, config: &Config) -> Result<u8> {
    let path = args.path(config);
    let mut document =
        RegionsDocument::load(&path).with_context(|| format!("reading {}", path.display()))?;

    let updated = add_placeholders(&mut document, &config.images.placeholder);
    if updated > 0 {
        document
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!("✓ Updated {} employees with placeholder avatar", updated);
    Ok(0)
}

/// Execute the fix-image-paths subcommand.
pub fn run_fix_image_paths(args: &RegionsFileArgs, config: &Config) -> Result<u8> {
    let path = args.path(config);
    let mut document =
        RegionsDocument::load(&path).with_context(|| format!("reading {}", path.display()))?;

    let rewritten = rewrite_image_prefix(
        &mut document,
        &config.images.rewrite_from,
        &config.images.rewrite_to,
    );
    if rewritten > 0 {
        document
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!("✓ Updated {} image paths in {}", rewritten, path.display());
    Ok(0)
}
