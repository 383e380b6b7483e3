use crate::types::{CellValue, ColumnId};
use std::collections::BTreeMap;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One worksheet held in memory.
///
/// Coordinates are 1-based (row 1, column 1 is `A1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
    max_row: u32,
    max_column: u32,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            max_row: 1,
            max_column: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a cell value. Empty values clear the cell but keep the extent.
    pub fn set(&mut self, row: u32, column: u32, value: CellValue) {
        if row == 0 || column == 0 {
            return;
        }
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
        if value == CellValue::Empty {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }

    /// Builder form of [`Sheet::set`]
    pub fn with(mut self, row: u32, column: u32, value: CellValue) -> Self {
        self.set(row, column, value);
        self
    }

    pub fn cell(&self, row: u32, column: u32) -> &CellValue {
        self.cells.get(&(row, column)).unwrap_or(&EMPTY_CELL)
    }

    /// Highest populated row (at least 1)
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Highest populated column (at least 1)
    pub fn max_column(&self) -> u32 {
        self.max_column
    }

    /// Columns 1..=max_column
    pub fn columns(&self) -> impl Iterator<Item = ColumnId> {
        (1..=self.max_column).map(ColumnId::from_index)
    }

    /// Cells of one row, left to right, including empty ones
    pub fn row_values(&self, row: u32) -> impl Iterator<Item = &CellValue> + '_ {
        (1..=self.max_column).map(move |col| self.cell(row, col))
    }
}

/// All worksheets of a workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
