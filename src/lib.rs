//! sheet-inspect - spreadsheet header, formula and dependency inspection
//!
//! Loads a workbook read-only and reports, per sheet, the header labels, the
//! formulas of a representative data row and a column-level dependency graph
//! recovered from formula text.
//!
//! # Features
//!
//! - Cell and whole-column reference extraction (`Sheet!$A$1`, `'My Sheet'!A:C`)
//! - Header-row and first-formula-row auto detection
//! - Full-sheet dependency graph with per-column formula counts
//! - Text or JSON reports
//!
//! # Example
//!
//! ```no_run
//! use sheet_inspect::cli::{inspect, InspectOptions};
//!
//! let options = InspectOptions {
//!     file: "pricing.xlsx".into(),
//!     all_sheets: true,
//!     scan_all_formulas: true,
//!     ..InspectOptions::default()
//! };
//! inspect(&options, &mut std::io::stdout())?;
//! # Ok::<(), sheet_inspect::error::InspectError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod report;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use error::{InspectError, InspectResult};
pub use types::{CellRef, CellValue, ColumnId, RowResolution, RowSource};
