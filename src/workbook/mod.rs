//! Read-only workbook model
//!
//! - `Sheet`: sparse 1-based cell grid for one worksheet
//! - `Workbook`: the worksheets of a file, in workbook order
//! - `load_workbook`: calamine-backed loader (xlsx, xlsm, xlsb, xls, ods)

mod loader;
mod sheet;

pub use loader::load_workbook;
pub use sheet::{Sheet, Workbook};
