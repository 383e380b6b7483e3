//! Column reference extraction from formula text
//!
//! Lexical scan only: `=A1+Rates!B2` → `{(current, A), (Rates, B)}`.
//! Functions, operators and string literals are not understood, so text such
//! as `LOG10(` or `"A1"` inside a literal is picked up as a reference.

use crate::error::InspectResult;
use crate::types::{CellRef, ColumnId, FORMULA_SENTINEL};
use regex::{Captures, Regex};
use std::collections::BTreeSet;

/// Optional `'Quoted Sheet'!` or `Sheet_1!` prefix
const SHEET_PREFIX: &str = r"(?:(?:'([^']+)'|([A-Za-z0-9_]+))!)?";

/// Extracts (sheet, column) pairs from formulas
pub struct ReferenceExtractor {
    /// Single cell: `Sheet!$A$1`
    cell_ref: Regex,
    /// Whole-column range: `Sheet!$A:$C`
    column_range: Regex,
}

impl ReferenceExtractor {
    pub fn new() -> InspectResult<Self> {
        let cell_ref = Regex::new(&format!(r"(?i){}\$?([A-Z]{{1,3}})\$?\d+", SHEET_PREFIX))?;
        let column_range = Regex::new(&format!(
            r"(?i){}\$?([A-Z]{{1,3}})\$?:\$?([A-Z]{{1,3}})\$?",
            SHEET_PREFIX
        ))?;
        Ok(Self {
            cell_ref,
            column_range,
        })
    }

    /// Collect every column referenced by `formula`.
    ///
    /// Unqualified references resolve to `current_sheet`. Whole-column ranges
    /// contribute their two endpoint columns only. Text without the leading
    /// `=` yields an empty set.
    pub fn extract(&self, formula: &str, current_sheet: &str) -> BTreeSet<CellRef> {
        let mut refs = BTreeSet::new();
        if !formula.starts_with(FORMULA_SENTINEL) {
            return refs;
        }

        for caps in self.cell_ref.captures_iter(formula) {
            let sheet = resolve_sheet(&caps, current_sheet);
            if let Some(column) = column_at(&caps, 3) {
                refs.insert(CellRef::new(sheet, column));
            }
        }

        for caps in self.column_range.captures_iter(formula) {
            let sheet = resolve_sheet(&caps, current_sheet);
            for group in [3, 4] {
                if let Some(column) = column_at(&caps, group) {
                    refs.insert(CellRef::new(sheet.clone(), column));
                }
            }
        }

        refs
    }
}

/// Quoted name, else unquoted name, else the current sheet; trimmed
fn resolve_sheet(caps: &Captures<'_>, current_sheet: &str) -> String {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or(current_sheet)
        .trim()
        .to_string()
}

fn column_at(caps: &Captures<'_>, group: usize) -> Option<ColumnId> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}
