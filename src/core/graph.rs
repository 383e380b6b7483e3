//! Column-level dependency graph for a whole sheet

use crate::core::references::ReferenceExtractor;
use crate::types::{CellRef, ColumnId, FormulaRecord};
use crate::workbook::Sheet;
use std::collections::{BTreeMap, BTreeSet};

/// Formula count and combined references of one column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDependencies {
    pub formula_count: usize,
    pub references: BTreeSet<CellRef>,
}

/// Dependencies of every formula-bearing column in a sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    pub columns: BTreeMap<ColumnId, ColumnDependencies>,
    /// Any reference points at another sheet
    pub has_cross_sheet: bool,
    /// Formula cells across the whole sheet
    pub formula_cells: usize,
}

/// Every formula cell in the sheet, row by row, left to right
pub fn collect_formula_cells(sheet: &Sheet) -> Vec<FormulaRecord> {
    let mut records = Vec::new();
    for row in 1..=sheet.max_row() {
        for column in sheet.columns() {
            if let Some(formula) = sheet.cell(row, column.index()).formula_text() {
                records.push(FormulaRecord {
                    row,
                    column,
                    formula: formula.to_string(),
                });
            }
        }
    }
    records
}

/// Group formula cells by column and merge their references.
///
/// Unqualified references resolve to the sheet's own name.
pub fn build_dependency_graph(sheet: &Sheet, extractor: &ReferenceExtractor) -> DependencyGraph {
    let records = collect_formula_cells(sheet);
    let mut graph = DependencyGraph {
        formula_cells: records.len(),
        ..DependencyGraph::default()
    };

    for record in &records {
        let entry = graph.columns.entry(record.column).or_default();
        entry.formula_count += 1;

        let refs = extractor.extract(&record.formula, sheet.name());
        if refs.iter().any(|r| r.sheet != sheet.name()) {
            graph.has_cross_sheet = true;
        }
        entry.references.extend(refs);
    }

    graph
}
