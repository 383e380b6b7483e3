//! Header-row and data-row auto detection

use crate::workbook::Sheet;

/// Pick the likely header row among the first `search_rows` rows.
///
/// The row with the most non-empty cells wins. On a tie the earlier row is
/// kept unless it contains a formula and the new row does not. Empty rows
/// are skipped; if all scanned rows are empty the result is row 1.
pub fn find_header_row(sheet: &Sheet, search_rows: u32) -> u32 {
    let last_row = sheet.max_row().min(search_rows);
    let mut best: Option<(u32, usize, bool)> = None;

    for row in 1..=last_row {
        let non_empty = sheet.row_values(row).filter(|v| !v.is_empty()).count();
        if non_empty == 0 {
            continue;
        }
        let has_formula = sheet.row_values(row).any(|v| v.is_formula());

        let better = match best {
            None => true,
            Some((_, best_count, best_has_formula)) => {
                non_empty > best_count
                    || (non_empty == best_count && best_has_formula && !has_formula)
            }
        };
        if better {
            best = Some((row, non_empty, has_formula));
        }
    }

    best.map(|(row, _, _)| row).unwrap_or(1)
}

/// Row of the first formula cell, scanning rows top-down and each row left
/// to right. `None` when the sheet has no formulas.
pub fn find_first_formula_row(sheet: &Sheet) -> Option<u32> {
    (1..=sheet.max_row()).find(|&row| sheet.row_values(row).any(|v| v.is_formula()))
}
