//! Header row → column labels

use crate::types::{placeholder_label, CellValue, ColumnId, HeaderMap, FORMULA_SENTINEL};
use crate::workbook::Sheet;
use std::collections::HashMap;

/// Build the label map for `header_row`, one entry per column up to
/// `max_column`.
///
/// Empty cells, non-text values and formula text get a `<Column X>`
/// placeholder instead of a label.
pub fn build_header_map(sheet: &Sheet, header_row: u32) -> HeaderMap {
    sheet
        .columns()
        .map(|column| {
            let label = match sheet.cell(header_row, column.index()) {
                CellValue::Text(text) => {
                    let cleaned = text.trim();
                    if cleaned.is_empty() || cleaned.starts_with(FORMULA_SENTINEL) {
                        placeholder_label(column)
                    } else {
                        cleaned.to_string()
                    }
                }
                _ => placeholder_label(column),
            };
            (column, label)
        })
        .collect()
}

/// Header maps of every sheet in a workbook, keyed by sheet name.
///
/// Built once before any sheet is analysed and only read afterwards, so
/// cross-sheet labels resolve against the target sheet's own headers.
#[derive(Debug, Clone, Default)]
pub struct HeaderMaps {
    maps: HashMap<String, HeaderMap>,
}

impl HeaderMaps {
    pub fn get(&self, sheet: &str) -> Option<&HeaderMap> {
        self.maps.get(sheet)
    }

    /// Label of `column` in `sheet`, or the `<Column X>` placeholder when the
    /// sheet or column is unknown.
    pub fn label(&self, sheet: &str, column: ColumnId) -> String {
        self.maps
            .get(sheet)
            .and_then(|map| map.get(&column))
            .cloned()
            .unwrap_or_else(|| placeholder_label(column))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl FromIterator<(String, HeaderMap)> for HeaderMaps {
    fn from_iter<I: IntoIterator<Item = (String, HeaderMap)>>(iter: I) -> Self {
        Self {
            maps: iter.into_iter().collect(),
        }
    }
}
