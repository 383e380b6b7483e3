use crate::error::InspectError;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Leading character that marks cell content as a formula.
pub const FORMULA_SENTINEL: char = '=';

//==============================================================================
// Column identifiers and references
//==============================================================================

/// Spreadsheet column (A, B, ..., Z, AA, ...), stored as a 1-based index.
///
/// Ordering follows the left-to-right position in the sheet, so `Z < AA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(u32);

impl ColumnId {
    /// Create a column from its 1-based index (1 → A, 27 → AA).
    ///
    /// Index 0 is clamped to column A.
    pub fn from_index(index: u32) -> Self {
        Self(index.max(1))
    }

    /// 1-based index of this column
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut num = self.0;
        while num > 0 {
            let remainder = (num - 1) % 26;
            letters.push((b'A' + remainder as u8) as char);
            num = (num - 1) / 26;
        }
        let label: String = letters.into_iter().rev().collect();
        f.write_str(&label)
    }
}

impl FromStr for ColumnId {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InspectError::InvalidColumn(s.to_string()));
        }

        let mut index: u32 = 0;
        for c in s.chars() {
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
            index = index
                .checked_mul(26)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| InspectError::InvalidColumn(s.to_string()))?;
        }
        Ok(Self(index))
    }
}

impl Serialize for ColumnId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved (sheet, column) dependency. Row positions are never kept.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CellRef {
    pub sheet: String,
    pub column: ColumnId,
}

impl CellRef {
    pub fn new(sheet: impl Into<String>, column: ColumnId) -> Self {
        Self {
            sheet: sheet.into(),
            column,
        }
    }

    /// Report ordering: sheet name case-insensitively, then column position.
    ///
    /// The exact sheet name breaks ties between names differing only in case.
    pub fn report_order(&self, other: &Self) -> std::cmp::Ordering {
        self.sheet
            .to_lowercase()
            .cmp(&other.sheet.to_lowercase())
            .then_with(|| self.column.cmp(&other.column))
            .then_with(|| self.sheet.cmp(&other.sheet))
    }
}

/// Sort references into report order.
pub fn sorted_refs<'a, I>(refs: I) -> Vec<CellRef>
where
    I: IntoIterator<Item = &'a CellRef>,
{
    let mut list: Vec<CellRef> = refs.into_iter().cloned().collect();
    list.sort_by(|a, b| a.report_order(b));
    list
}

/// Column → display label for one sheet
pub type HeaderMap = BTreeMap<ColumnId, String>;

/// Placeholder label for columns without a usable header
pub fn placeholder_label(column: ColumnId) -> String {
    format!("<Column {}>", column)
}

//==============================================================================
// Cell values
//==============================================================================

/// Content of a single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Formula text, always starting with `=`
    Formula(String),
    /// Dates, durations and error values, kept as display text
    Other(String),
}

impl CellValue {
    /// Build a formula value, restoring the sentinel if the reader stripped it.
    pub fn formula(text: &str) -> Self {
        if text.starts_with(FORMULA_SENTINEL) {
            CellValue::Formula(text.to_string())
        } else {
            CellValue::Formula(format!("{}{}", FORMULA_SENTINEL, text))
        }
    }

    /// Empty cells and whitespace-only text
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Formula text if this cell holds a formula.
    ///
    /// Stored strings starting with `=` read as formulas too.
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            CellValue::Text(s) if s.starts_with(FORMULA_SENTINEL) => Some(s),
            _ => None,
        }
    }

    pub fn is_formula(&self) -> bool {
        self.formula_text().is_some()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) | CellValue::Formula(s) | CellValue::Other(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// A formula found while scanning a sheet (1-based row)
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaRecord {
    pub row: u32,
    pub column: ColumnId,
    pub formula: String,
}

//==============================================================================
// Row resolution
//==============================================================================

/// Where a header or data row number came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSource {
    /// Given explicitly on the command line (or the default)
    Manual,
    /// Detected by scanning the sheet
    Auto,
    /// Auto detection found no formulas; the default row was used
    AutoFallback,
}

impl RowSource {
    /// Annotation appended to the row number in the text report
    pub fn suffix(self) -> &'static str {
        match self {
            RowSource::Manual => "",
            RowSource::Auto => " (auto)",
            RowSource::AutoFallback => " (auto fallback; no formulas found)",
        }
    }
}

/// A 1-based row number with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowResolution {
    pub row: u32,
    pub source: RowSource,
}

impl RowResolution {
    pub fn manual(row: u32) -> Self {
        Self {
            row,
            source: RowSource::Manual,
        }
    }

    pub fn auto(row: u32) -> Self {
        Self {
            row,
            source: RowSource::Auto,
        }
    }

    pub fn fallback(row: u32) -> Self {
        Self {
            row,
            source: RowSource::AutoFallback,
        }
    }
}

/// Resolved header and data rows for one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SheetRows {
    pub header: RowResolution,
    pub data: RowResolution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_display() {
        assert_eq!(ColumnId::from_index(1).to_string(), "A");
        assert_eq!(ColumnId::from_index(26).to_string(), "Z");
        assert_eq!(ColumnId::from_index(27).to_string(), "AA");
        assert_eq!(ColumnId::from_index(52).to_string(), "AZ");
        assert_eq!(ColumnId::from_index(53).to_string(), "BA");
        assert_eq!(ColumnId::from_index(703).to_string(), "AAA");
        assert_eq!(ColumnId::from_index(16384).to_string(), "XFD");
    }

    #[test]
    fn test_column_id_parse() {
        assert_eq!("A".parse::<ColumnId>().unwrap().index(), 1);
        assert_eq!("z".parse::<ColumnId>().unwrap().index(), 26);
        assert_eq!("AA".parse::<ColumnId>().unwrap().index(), 27);
        assert_eq!("XFD".parse::<ColumnId>().unwrap().index(), 16384);
        assert!("".parse::<ColumnId>().is_err());
        assert!("A1".parse::<ColumnId>().is_err());
    }

    #[test]
    fn test_column_id_order_is_positional() {
        let z: ColumnId = "Z".parse().unwrap();
        let aa: ColumnId = "AA".parse().unwrap();
        assert!(z < aa);
    }

    #[test]
    fn test_sorted_refs_case_insensitive_sheets() {
        let a: ColumnId = "A".parse().unwrap();
        let c: ColumnId = "C".parse().unwrap();
        let refs = [
            CellRef::new("beta", a),
            CellRef::new("Alpha", c),
            CellRef::new("Alpha", a),
        ];
        let sorted = sorted_refs(&refs);
        assert_eq!(
            sorted,
            vec![
                CellRef::new("Alpha", a),
                CellRef::new("Alpha", c),
                CellRef::new("beta", a),
            ]
        );
    }

    #[test]
    fn test_cell_value_formula_detection() {
        assert!(CellValue::formula("A1*2").is_formula());
        assert_eq!(CellValue::formula("A1*2").formula_text(), Some("=A1*2"));
        assert!(CellValue::Text("=B2".to_string()).is_formula());
        assert!(!CellValue::Text("Total".to_string()).is_formula());
        assert!(!CellValue::Number(5.0).is_formula());
    }

    #[test]
    fn test_cell_value_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_row_source_suffix() {
        assert_eq!(RowSource::Manual.suffix(), "");
        assert_eq!(RowSource::Auto.suffix(), " (auto)");
        assert_eq!(
            RowSource::AutoFallback.suffix(),
            " (auto fallback; no formulas found)"
        );
    }
}
