use crate::core::{build_dependency_graph, HeaderMaps, ReferenceExtractor};
use crate::report::{ColumnReport, Dependency, GraphReport, HeaderCell, RowFormula, SheetReport};
use crate::types::{sorted_refs, CellRef, ColumnId, SheetRows};
use crate::workbook::Sheet;
use std::collections::BTreeSet;

/// Inspect one sheet: headers, data-row formulas and their dependencies, and
/// with `scan_all` the dependency graph of every formula in the sheet.
pub fn analyze_sheet(
    sheet: &Sheet,
    rows: SheetRows,
    header_maps: &HeaderMaps,
    extractor: &ReferenceExtractor,
    scan_all: bool,
) -> SheetReport {
    let name = sheet.name();

    let headers = sheet
        .columns()
        .map(|column| {
            let value = sheet.cell(rows.header.row, column.index());
            HeaderCell {
                column,
                value: (!value.is_empty()).then(|| value.to_string()),
            }
        })
        .collect();

    let row_formulas: Vec<RowFormula> = sheet
        .columns()
        .map(|column| RowFormula {
            column,
            label: header_maps.label(name, column),
            formula: sheet
                .cell(rows.data.row, column.index())
                .formula_text()
                .map(str::to_string),
        })
        .collect();

    let mut row_cross_sheet = false;
    let mut row_dependencies = Vec::new();
    for entry in &row_formulas {
        let Some(formula) = &entry.formula else {
            continue;
        };
        let refs = extractor.extract(formula, name);
        row_cross_sheet |= refs.iter().any(|r| r.sheet != name);
        row_dependencies.push(column_report(entry.column, None, &refs, name, header_maps));
    }

    let graph = scan_all.then(|| {
        let graph = build_dependency_graph(sheet, extractor);
        GraphReport {
            formula_cells: graph.formula_cells,
            columns: graph
                .columns
                .iter()
                .map(|(column, deps)| {
                    column_report(
                        *column,
                        Some(deps.formula_count),
                        &deps.references,
                        name,
                        header_maps,
                    )
                })
                .collect(),
            cross_sheet: graph.has_cross_sheet,
        }
    });

    SheetReport {
        sheet: name.to_string(),
        rows,
        headers,
        row_formulas,
        row_dependencies,
        row_cross_sheet,
        graph,
    }
}

fn column_report(
    column: ColumnId,
    formula_count: Option<usize>,
    refs: &BTreeSet<CellRef>,
    current_sheet: &str,
    header_maps: &HeaderMaps,
) -> ColumnReport {
    ColumnReport {
        column,
        label: header_maps.label(current_sheet, column),
        formula_count,
        dependencies: sorted_refs(refs)
            .into_iter()
            .map(|r| Dependency {
                label: header_maps.label(&r.sheet, r.column),
                cross_sheet: r.sheet != current_sheet,
                sheet: r.sheet,
                column: r.column,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_header_map;
    use crate::types::{CellValue, RowResolution};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn quotes() -> Sheet {
        Sheet::new("Quotes")
            .with(1, 1, text("Procedure"))
            .with(1, 2, text("Cost"))
            .with(1, 3, text("Total"))
            .with(2, 1, text("Botox"))
            .with(2, 2, CellValue::Number(300.0))
            .with(2, 3, CellValue::formula("=B2*(1+Rates!A2)"))
            .with(3, 1, text("Filler"))
            .with(3, 2, CellValue::Number(450.0))
            .with(3, 3, CellValue::formula("=B3*(1+Rates!A3)"))
            .with(4, 3, CellValue::formula("=SUM(C2:C3)"))
    }

    fn rates() -> Sheet {
        Sheet::new("Rates")
            .with(1, 1, text("Markup"))
            .with(2, 1, CellValue::Number(0.2))
    }

    fn maps(sheets: &[&Sheet]) -> HeaderMaps {
        sheets
            .iter()
            .map(|s| (s.name().to_string(), build_header_map(s, 1)))
            .collect()
    }

    fn rows(data: u32) -> SheetRows {
        SheetRows {
            header: RowResolution::manual(1),
            data: RowResolution::manual(data),
        }
    }

    #[test]
    fn test_row_dependencies_use_target_sheet_labels() {
        let (quotes, rates) = (quotes(), rates());
        let extractor = ReferenceExtractor::new().unwrap();
        let maps = maps(&[&quotes, &rates]);
        let report = analyze_sheet(&quotes, rows(2), &maps, &extractor, false);

        assert_eq!(report.row_dependencies.len(), 1);
        assert_eq!(
            report.row_dependencies[0].to_string(),
            "- C (Total) depends on: Cost (B), Rates!A (Markup)"
        );
        assert!(report.row_cross_sheet);
        assert!(report.graph.is_none());
    }

    #[test]
    fn test_row_formulas_cover_every_column() {
        let (quotes, rates) = (quotes(), rates());
        let extractor = ReferenceExtractor::new().unwrap();
        let maps = maps(&[&quotes, &rates]);
        let report = analyze_sheet(&quotes, rows(2), &maps, &extractor, false);

        let formulas: Vec<Option<&str>> = report
            .row_formulas
            .iter()
            .map(|f| f.formula.as_deref())
            .collect();
        assert_eq!(formulas, vec![None, None, Some("=B2*(1+Rates!A2)")]);
        assert_eq!(report.headers[0].value.as_deref(), Some("Procedure"));
    }

    #[test]
    fn test_row_without_formulas() {
        let (quotes, rates) = (quotes(), rates());
        let extractor = ReferenceExtractor::new().unwrap();
        let maps = maps(&[&quotes, &rates]);
        let report = analyze_sheet(&quotes, rows(1), &maps, &extractor, false);

        assert!(report.row_dependencies.is_empty());
        assert!(!report.row_cross_sheet);
        assert!(report
            .to_string()
            .contains("- No formulas found in the first data row."));
    }

    #[test]
    fn test_graph_section() {
        let (quotes, rates) = (quotes(), rates());
        let extractor = ReferenceExtractor::new().unwrap();
        let maps = maps(&[&quotes, &rates]);
        let report = analyze_sheet(&quotes, rows(2), &maps, &extractor, true);

        let graph = report.graph.as_ref().unwrap();
        assert_eq!(graph.formula_cells, 3);
        assert!(graph.cross_sheet);
        assert_eq!(graph.columns.len(), 1);
        assert_eq!(
            graph.columns[0].to_string(),
            "- C (Total) [formulas: 3] depends on: Cost (B), Total (C), Rates!A (Markup)"
        );

        let text = report.to_string();
        assert_eq!(text.matches(crate::report::CROSS_SHEET_NOTE).count(), 1);
    }

    #[test]
    fn test_unknown_sheet_label_placeholder() {
        let sheet = Sheet::new("Quotes")
            .with(1, 1, text("Total"))
            .with(2, 1, CellValue::formula("='Old Rates'!B2"));
        let extractor = ReferenceExtractor::new().unwrap();
        let report = analyze_sheet(&sheet, rows(2), &maps(&[&sheet]), &extractor, false);

        assert_eq!(
            report.row_dependencies[0].to_string(),
            "- A (Total) depends on: Old Rates!B (<Column B>)"
        );
    }

    #[test]
    fn test_formula_without_refs_in_data_row() {
        let sheet = Sheet::new("Quotes")
            .with(1, 1, text("Date"))
            .with(2, 1, CellValue::formula("=TODAY()"));
        let extractor = ReferenceExtractor::new().unwrap();
        let report = analyze_sheet(&sheet, rows(2), &maps(&[&sheet]), &extractor, false);

        assert_eq!(
            report.row_dependencies[0].to_string(),
            "- A (Date): <no column refs detected>"
        );
    }
}
