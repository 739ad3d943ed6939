//! The employee directory: sheet export, photo matching, region merge and
//! maintenance of the published regions file.

pub mod maintenance;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod rename;
pub mod sheet;

pub use maintenance::{add_placeholders, rewrite_image_prefix};
pub use matcher::{assign_photos, available_photos, match_photo};
pub use merge::{MergeOptions, MergeReport, Unmatched, UnmatchedReason, merge_employees};
pub use model::{
    Employee, Metadata, Region, RegionsDocument, SheetEmployee, load_sheet_employees,
    save_sheet_employees,
};
pub use rename::{RenameAction, RenameReport, RenameRules, rename_photos};
pub use sheet::{SheetColumns, employees_from_rows};
