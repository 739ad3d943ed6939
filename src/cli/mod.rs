//! # roster-prep command line
//!
//! One subcommand per preparation step. Handlers return the process exit code
//! (0 on success, 1 when the step could not do its job) and propagate fatal
//! errors as `anyhow::Error`.

pub mod employees;
pub mod photos;
pub mod regions;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use employees::{BuildEmployeesArgs, run_build_employees};
use photos::{
    ExtractAllArgs, ExtractPhotosArgs, RenamePhotosArgs, run_extract_all, run_extract_photos,
    run_rename_photos,
};
use regions::{MergeArgs, RegionsFileArgs, run_add_placeholders, run_fix_image_paths, run_merge};

/// Separator line of the progress reports.
pub(crate) const RULE: &str =
    "============================================================";

/// Data preparation for the regional employee directory.
///
/// Extracts profile photos from onboarding decks, exports the candidate
/// spreadsheet to JSON and merges it into the published regions file.
#[derive(Parser, Debug)]
#[command(name = "roster-prep", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ./roster-prep.yaml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the profile photo of every deck in the slides directory.
    ExtractPhotos(ExtractPhotosArgs),

    /// Export every image of one deck, numbered, to find the photo's position.
    ExtractAll(ExtractAllArgs),

    /// Rename photos to lowercase names without spaces or dashes.
    RenamePhotos(RenamePhotosArgs),

    /// Build employees.json from the spreadsheet and the available photos.
    BuildEmployees(BuildEmployeesArgs),

    /// Merge employees.json into the regions file.
    Merge(MergeArgs),

    /// Give employees without photos the placeholder avatar.
    AddPlaceholders(RegionsFileArgs),

    /// Point image paths at the published images folder.
    FixImagePaths(RegionsFileArgs),
}

/// Run a subcommand against a loaded configuration.
pub fn run(command: &Commands, config: &Config) -> Result<u8> {
    match command {
        Commands::ExtractPhotos(args) => run_extract_photos(args, config),
        Commands::ExtractAll(args) => run_extract_all(args, config),
        Commands::RenamePhotos(args) => run_rename_photos(args, config),
        Commands::BuildEmployees(args) => run_build_employees(args, config),
        Commands::Merge(args) => run_merge(args, config),
        Commands::AddPlaceholders(args) => run_add_placeholders(args, config),
        Commands::FixImagePaths(args) => run_fix_image_paths(args, config),
    }
}

/// Install the stdout subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Human-readable file size, e.g. `812B` or `45.3KB`.
pub(crate) fn format_size(size: u64) -> String {
    if size >= 1024 {
        format!("{:.1}KB", size as f64 / 1024.0)
    } else {
        format!("{}B", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::package::fixtures::write_zip;
    use crate::roster::RegionsDocument;
    use crate::roster::model::fixtures::REGIONS_JSON;
    use crate::xlsx::workbook::fixtures::spreadsheet_members;

    #[test]
    fn cli_parse_extract_photos_ordinals() {
        let cli = Cli::try_parse_from(["roster-prep", "extract-photos", "--media-ordinal", "7"]).unwrap();
        if let Commands::ExtractPhotos(args) = cli.command {
            assert_eq!(args.media_ordinal, Some(7));
            assert_eq!(args.ordinal, None);
        } else {
            panic!("expected extract-photos");
        }

        assert!(
            Cli::try_parse_from([
                "roster-prep",
                "extract-photos",
                "--ordinal",
                "2",
                "--media-ordinal",
                "7"
            ])
            .is_err()
        );
        assert!(Cli::try_parse_from(["roster-prep", "extract-photos", "--ordinal", "0"]).is_err());
    }

    #[test]
    fn cli_parse_global_options() {
        let cli = Cli::try_parse_from([
            "roster-prep",
            "-vv",
            "merge",
            "--config",
            "prep.yaml",
            "--regions",
            "site/regions.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("prep.yaml")));
        if let Commands::Merge(args) = cli.command {
            assert_eq!(args.regions, Some(PathBuf::from("site/regions.json")));
            assert!(args.employees.is_none());
        } else {
            panic!("expected merge");
        }
    }

    #[test]
    fn cli_parse_extract_all_requires_document() {
        assert!(Cli::try_parse_from(["roster-prep", "extract-all"]).is_err());
        let cli = Cli::try_parse_from(["roster-prep", "extract-all", "deck.pptx"]).unwrap();
        assert!(matches!(cli.command, Commands::ExtractAll(_)));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["roster-prep"]).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(812), "812B");
        assert_eq!(format_size(2048), "2.0KB");
    }

    fn config_in(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.paths.slides_dir = root.join("slides");
        config.paths.spreadsheet = root.join("slides/candidates.xlsx");
        config.paths.employees_json = root.join("employees.json");
        config.paths.regions_json = root.join("data/regions.json");
        config.paths.scratch_root = Some(root.join("scratch"));
        config
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["roster-prep"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_spreadsheet_to_published_regions() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.paths.slides_dir).unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(&config.paths.regions_json, REGIONS_JSON).unwrap();
        std::fs::write(config.paths.slides_dir.join("saeed_alqadi.jpeg"), b"jpeg").unwrap();

        const SHEET: &str = r#"<worksheet><sheetData>
            <row r="1"><c r="B1" t="s"><v>0</v></c></row>
            <row r="2"><c r="B2" t="s"><v>0</v></c></row>
            <row r="3"><c r="B3" t="s"><v>1</v></c><c r="C3" t="s"><v>2</v></c><c r="E3" t="s"><v>3</v></c><c r="G3"><v>45292</v></c></row>
        </sheetData></worksheet>"#;
        write_zip(&config.paths.slides_dir, "candidates.xlsx", &spreadsheet_members(SHEET));

        assert_eq!(run(&parse(&["build-employees"]), &config).unwrap(), 0);
        let employees = crate::roster::load_sheet_employees(&config.paths.employees_json).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].starting_date.as_deref(), Some("2024-01-01"));
        assert_eq!(employees[0].profile_picture.as_deref(), Some("saeed_alqadi.jpeg"));

        assert_eq!(run(&parse(&["merge"]), &config).unwrap(), 0);
        assert_eq!(run(&parse(&["add-placeholders"]), &config).unwrap(), 0);
        assert_eq!(run(&parse(&["fix-image-paths"]), &config).unwrap(), 0);

        let doc = RegionsDocument::load(&config.paths.regions_json).unwrap();
        assert_eq!(doc.metadata.total_employees, 1);
        assert_eq!(doc.metadata.total_regions, 1);
        let saeed = &doc.regions["SA-11"].employees[0];
        assert_eq!(saeed.id, "emp001");
        assert_eq!(saeed.name_en, "Saeed Al Qadi");
        assert_eq!(saeed.position_en.as_deref(), Some("Consultant"));
        assert_eq!(saeed.images, vec!["images/saeed_alqadi.jpeg"]);

        let scratch = config.paths.scratch_root.as_ref().unwrap();
        assert_eq!(std::fs::read_dir(scratch).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_inputs_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        assert!(run(&parse(&["build-employees"]), &config).is_err());
        assert!(run(&parse(&["merge"]), &config).is_err());
        assert!(run(&parse(&["add-placeholders"]), &config).is_err());
        assert!(run(&parse(&["extract-all", "absent.pptx"]), &config).is_err());
        assert!(run(&parse(&["extract-photos"]), &config).is_err());
    }

    #[test]
    fn test_extract_photos_reports_failures_with_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let slides = &config.paths.slides_dir;
        std::fs::create_dir_all(slides).unwrap();
        write_zip(
            slides,
            "Welcome onboard - Saeed Alqadi.pptx",
            &[("ppt/media/image1.png", b"a"), ("ppt/media/image2.jpeg", b"b")],
        );
        write_zip(slides, "Welcome onboard - Empty.pptx", &[("ppt/presentation.xml", b"<p/>")]);

        let code = run(&parse(&["extract-photos", "--media-ordinal", "2"]), &config).unwrap();
        assert_eq!(code, 1);
        assert_eq!(std::fs::read(slides.join("Saeed Alqadi.jpeg")).unwrap(), b"b");

        let code = run(
            &parse(&["rename-photos", "--slides-dir", slides.to_str().unwrap()]),
            &config,
        )
        .unwrap();
        assert_eq!(code, 0);
        assert!(slides.join("saeed_alqadi.jpeg").exists());
    }
}
