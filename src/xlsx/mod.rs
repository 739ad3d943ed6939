//! Spreadsheet (.xlsx) reading.
//!
//! Only what a one-shot export needs: the primary worksheet's rows as text,
//! shared string resolution, and decoding of date serial numbers.

pub mod cell;
pub mod date;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

pub use cell::RowRecord;
pub use date::{format_date_cell, serial_to_date};
pub use shared_strings::SharedStrings;
pub use workbook::{Workbook, read_data_rows};
