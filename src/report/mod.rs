//! Per-sheet inspection report
//!
//! `analyze_sheet` produces a `SheetReport`. The text form (`Display`) is the
//! console report; `render_json` serializes the same data.

mod analyzer;

pub use analyzer::analyze_sheet;

use crate::error::InspectResult;
use crate::types::{ColumnId, SheetRows};
use serde::Serialize;
use std::fmt;

/// Shown after the dependency sections when a reference crosses sheets
pub const CROSS_SHEET_NOTE: &str = "Note: cross-sheet dependencies are listed as Sheet!Column.";

/// Rule printed between sheets in the text report
pub fn sheet_separator() -> String {
    format!("\n{}\n\n", "-".repeat(60))
}

/// One referenced column, with the label from its own sheet's header map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    pub sheet: String,
    pub column: ColumnId,
    pub label: String,
    pub cross_sheet: bool,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cross_sheet {
            write!(f, "{}!{} ({})", self.sheet, self.column, self.label)
        } else {
            write!(f, "{} ({})", self.label, self.column)
        }
    }
}

/// Raw header cell; `None` when empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub column: ColumnId,
    pub value: Option<String>,
}

/// Formula at the data row; `None` when the cell holds no formula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFormula {
    pub column: ColumnId,
    pub label: String,
    pub formula: Option<String>,
}

/// Dependencies of one formula column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    pub column: ColumnId,
    pub label: String,
    /// Only set in the full-sheet graph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_count: Option<usize>,
    pub dependencies: Vec<Dependency>,
}

impl fmt::Display for ColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} ({})", self.column, self.label)?;
        if let Some(count) = self.formula_count {
            write!(f, " [formulas: {}]", count)?;
        }
        if self.dependencies.is_empty() {
            return write!(f, ": <no column refs detected>");
        }
        write!(f, " depends on: ")?;
        for (i, dep) in self.dependencies.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dep)?;
        }
        Ok(())
    }
}

/// Full-sheet dependency graph section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphReport {
    pub formula_cells: usize,
    pub columns: Vec<ColumnReport>,
    pub cross_sheet: bool,
}

/// Everything reported for one sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub sheet: String,
    pub rows: SheetRows,
    pub headers: Vec<HeaderCell>,
    pub row_formulas: Vec<RowFormula>,
    pub row_dependencies: Vec<ColumnReport>,
    pub row_cross_sheet: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphReport>,
}

impl fmt::Display for SheetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.rows.header;
        let data = self.rows.data;

        writeln!(f, "Sheet: {}", self.sheet)?;
        writeln!(f, "Header row: {}{}", header.row, header.source.suffix())?;
        writeln!(f, "Data row: {}{}", data.row, data.source.suffix())?;

        writeln!(f, "\nHeaders (row {}):", header.row)?;
        for cell in &self.headers {
            writeln!(
                f,
                "- {}: {}",
                cell.column,
                cell.value.as_deref().unwrap_or("<empty>")
            )?;
        }

        writeln!(f, "\nRaw formulas (row {}):", data.row)?;
        for entry in &self.row_formulas {
            writeln!(
                f,
                "- {} ({}): {}",
                entry.column,
                entry.label,
                entry.formula.as_deref().unwrap_or("<no formula>")
            )?;
        }

        writeln!(f, "\nDependencies (based on row {} formulas):", data.row)?;
        if self.row_dependencies.is_empty() {
            writeln!(f, "- No formulas found in the first data row.")?;
        }
        for column in &self.row_dependencies {
            writeln!(f, "{}", column)?;
        }

        // The graph section repeats the note, so only one is printed
        if self.row_cross_sheet && self.graph.is_none() {
            writeln!(f, "\n{}", CROSS_SHEET_NOTE)?;
        }

        if let Some(graph) = &self.graph {
            writeln!(f, "\nDependency graph (all formulas in sheet):")?;
            if graph.formula_cells == 0 {
                writeln!(f, "- No formulas found in sheet.")?;
            } else {
                writeln!(f, "- Formula cells found: {}", graph.formula_cells)?;
                for column in &graph.columns {
                    writeln!(f, "{}", column)?;
                }
                if graph.cross_sheet {
                    writeln!(f, "\n{}", CROSS_SHEET_NOTE)?;
                }
            }
        }

        Ok(())
    }
}

/// Render reports as a pretty-printed JSON array
pub fn render_json(reports: &[SheetReport]) -> InspectResult<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Render reports as console text, separated by a rule
pub fn render_text(reports: &[SheetReport]) -> String {
    reports
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(&sheet_separator())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowResolution;
    use pretty_assertions::assert_eq;

    fn col(label: &str) -> ColumnId {
        label.parse().unwrap()
    }

    fn minimal_report(graph: Option<GraphReport>) -> SheetReport {
        SheetReport {
            sheet: "Quotes".to_string(),
            rows: SheetRows {
                header: RowResolution::auto(1),
                data: RowResolution::fallback(2),
            },
            headers: vec![
                HeaderCell {
                    column: col("A"),
                    value: Some("Cost".to_string()),
                },
                HeaderCell {
                    column: col("B"),
                    value: None,
                },
            ],
            row_formulas: vec![
                RowFormula {
                    column: col("A"),
                    label: "Cost".to_string(),
                    formula: None,
                },
                RowFormula {
                    column: col("B"),
                    label: "<Column B>".to_string(),
                    formula: Some("=Rates!A2*A2".to_string()),
                },
            ],
            row_dependencies: vec![ColumnReport {
                column: col("B"),
                label: "<Column B>".to_string(),
                formula_count: None,
                dependencies: vec![
                    Dependency {
                        sheet: "Quotes".to_string(),
                        column: col("A"),
                        label: "Cost".to_string(),
                        cross_sheet: false,
                    },
                    Dependency {
                        sheet: "Rates".to_string(),
                        column: col("A"),
                        label: "Rate".to_string(),
                        cross_sheet: true,
                    },
                ],
            }],
            row_cross_sheet: true,
            graph,
        }
    }

    #[test]
    fn test_dependency_display() {
        let local = Dependency {
            sheet: "Quotes".to_string(),
            column: col("C"),
            label: "Price".to_string(),
            cross_sheet: false,
        };
        let remote = Dependency {
            sheet: "Rates".to_string(),
            column: col("A"),
            label: "Rate".to_string(),
            cross_sheet: true,
        };
        assert_eq!(local.to_string(), "Price (C)");
        assert_eq!(remote.to_string(), "Rates!A (Rate)");
    }

    #[test]
    fn test_column_report_without_refs() {
        let report = ColumnReport {
            column: col("D"),
            label: "Date".to_string(),
            formula_count: Some(3),
            dependencies: vec![],
        };
        assert_eq!(
            report.to_string(),
            "- D (Date) [formulas: 3]: <no column refs detected>"
        );
    }

    #[test]
    fn test_text_report_single_row() {
        let expected = "\
Sheet: Quotes
Header row: 1 (auto)
Data row: 2 (auto fallback; no formulas found)

Headers (row 1):
- A: Cost
- B: <empty>

Raw formulas (row 2):
- A (Cost): <no formula>
- B (<Column B>): =Rates!A2*A2

Dependencies (based on row 2 formulas):
- B (<Column B>) depends on: Cost (A), Rates!A (Rate)

Note: cross-sheet dependencies are listed as Sheet!Column.
";
        assert_eq!(minimal_report(None).to_string(), expected);
    }

    #[test]
    fn test_text_report_graph_without_formulas() {
        let report = minimal_report(Some(GraphReport {
            formula_cells: 0,
            columns: vec![],
            cross_sheet: false,
        }));
        let text = report.to_string();
        assert!(text.ends_with(
            "Dependency graph (all formulas in sheet):\n- No formulas found in sheet.\n"
        ));
        // Row-level note is suppressed when the graph section is shown
        assert!(!text.contains(CROSS_SHEET_NOTE));
    }

    #[test]
    fn test_render_text_separator() {
        let reports = vec![minimal_report(None), minimal_report(None)];
        let text = render_text(&reports);
        let rule = format!("\n\n{}\n\n", "-".repeat(60));
        assert_eq!(text.matches(&rule).count(), 1);
        assert!(text.starts_with("Sheet: Quotes\n"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[minimal_report(None)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["sheet"], "Quotes");
        assert_eq!(value[0]["rows"]["data"]["source"], "auto_fallback");
        assert_eq!(value[0]["row_dependencies"][0]["dependencies"][1]["sheet"], "Rates");
        assert_eq!(value[0]["row_dependencies"][0]["column"], "B");
        assert!(value[0].get("graph").is_none());
    }
}
