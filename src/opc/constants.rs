/// Constant values used when navigating packaged documents.
///
/// Only the handful of part names and attribute values that the spreadsheet
/// and slide-deck readers actually follow are listed here.

/// Relationship target modes
pub mod target_mode {
    pub const EXTERNAL: &str = "External";
}

/// Well-known part names inside a presentation package
pub mod pptx {
    /// Markup of the first slide
    pub const FIRST_SLIDE: &str = "/ppt/slides/slide1.xml";
    /// Directory holding embedded binary media parts
    pub const MEDIA_DIR: &str = "/ppt/media";
}

/// Well-known part names inside a spreadsheet package
pub mod xlsx {
    pub const WORKBOOK: &str = "/xl/workbook.xml";
    pub const SHARED_STRINGS: &str = "/xl/sharedStrings.xml";
    /// Fallback location of the primary worksheet when the workbook
    /// relationships cannot be followed
    pub const FIRST_WORKSHEET: &str = "/xl/worksheets/sheet1.xml";
}

/// File extensions (lowercase, without the dot) treated as raster images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif"];
