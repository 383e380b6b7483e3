//! Workbook loader - spreadsheet file → in-memory `Workbook`

use crate::error::{InspectError, InspectResult};
use crate::types::CellValue;
use crate::workbook::{Sheet, Workbook};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader, SheetType};
use std::path::Path;
use tracing::{debug, warn};

/// Open a workbook read-only and load every worksheet with its formulas.
///
/// Formula text wins over the cached value of the same cell. Chart, dialog
/// and macro sheets are skipped.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> InspectResult<Workbook> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        InspectError::Workbook(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let sheet_names: Vec<String> = workbook
        .sheets_metadata()
        .iter()
        .filter(|meta| matches!(meta.typ, SheetType::WorkSheet))
        .map(|meta| meta.name.clone())
        .collect();
    debug!(file = %path.display(), sheets = sheet_names.len(), "opened workbook");

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let values = workbook.worksheet_range(&name).map_err(|e| {
            InspectError::Workbook(format!("Failed to read sheet '{}': {}", name, e))
        })?;

        let formulas = match workbook.worksheet_formula(&name) {
            Ok(range) => Some(range),
            Err(e) => {
                warn!(sheet = %name, error = %e, "formulas unavailable, loading values only");
                None
            }
        };

        let sheet = build_sheet(&name, &values, formulas.as_ref());
        debug!(
            sheet = %name,
            max_row = sheet.max_row(),
            max_column = sheet.max_column(),
            "loaded sheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

/// Merge the value and formula ranges of one worksheet into a `Sheet`
fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    if let Some((start_row, start_col)) = values.start() {
        for (row, col, cell) in values.used_cells() {
            let value = convert_cell(cell);
            if value != CellValue::Empty {
                sheet.set(
                    start_row + row as u32 + 1,
                    start_col + col as u32 + 1,
                    value,
                );
            }
        }
    }

    if let Some(formulas) = formulas {
        if let Some((start_row, start_col)) = formulas.start() {
            for (row, col, formula) in formulas.used_cells() {
                if formula.trim().is_empty() {
                    continue;
                }
                sheet.set(
                    start_row + row as u32 + 1,
                    start_col + col as u32 + 1,
                    CellValue::formula(formula),
                );
            }
        }
    }

    sheet
}

/// Convert a calamine cell to a `CellValue`
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => convert_datetime(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Other(s.clone()),
        Data::Error(e) => CellValue::Other(e.to_string()),
    }
}

/// Date cells render as `YYYY-MM-DD HH:MM:SS`, durations as `H:MM:SS`.
/// Serials outside chrono's range stay numeric.
fn convert_datetime(dt: &ExcelDateTime) -> CellValue {
    let rendered = if dt.is_duration() {
        dt.as_duration().map(format_duration)
    } else {
        dt.as_datetime()
            .map(|value| value.format("%Y-%m-%d %H:%M:%S").to_string())
    };
    rendered
        .map(CellValue::Other)
        .unwrap_or_else(|| CellValue::Number(dt.as_f64()))
}

fn format_duration(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
