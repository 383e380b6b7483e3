use crate::core::{
    build_header_map, find_first_formula_row, find_header_row, HeaderMaps, ReferenceExtractor,
};
use crate::error::{InspectError, InspectResult};
use crate::report::{analyze_sheet, render_json, render_text, SheetReport};
use crate::types::{RowResolution, SheetRows};
use crate::workbook::{load_workbook, Sheet, Workbook};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Inspection settings
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub file: PathBuf,
    /// Sheet to inspect; the first worksheet when unset
    pub sheet: Option<String>,
    pub all_sheets: bool,
    pub header_row: u32,
    pub data_row: u32,
    pub auto_header_row: bool,
    pub header_search_rows: u32,
    pub auto_data_row: bool,
    pub scan_all_formulas: bool,
    pub format: OutputFormat,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CareNTour_Pricing_Tool.xlsx"),
            sheet: None,
            all_sheets: false,
            header_row: 1,
            data_row: 2,
            auto_header_row: false,
            header_search_rows: 10,
            auto_data_row: false,
            scan_all_formulas: false,
            format: OutputFormat::Text,
        }
    }
}

impl InspectOptions {
    /// Data-row detection is always on when every sheet is inspected
    pub fn detect_data_row(&self) -> bool {
        self.auto_data_row || self.all_sheets
    }
}

/// Execute the inspect command: load the workbook and write the report to `out`
pub fn inspect<W: Write>(options: &InspectOptions, out: &mut W) -> InspectResult<()> {
    if !options.file.exists() {
        return Err(InspectError::FileNotFound(options.file.clone()));
    }

    let workbook = load_workbook(&options.file)?;
    let reports = build_reports(&workbook, options)?;

    match options.format {
        OutputFormat::Text => write!(out, "{}", render_text(&reports))?,
        OutputFormat::Json => writeln!(out, "{}", render_json(&reports)?)?,
    }
    out.flush()?;
    Ok(())
}

/// Analyse the selected sheets of an already loaded workbook
pub fn build_reports(
    workbook: &Workbook,
    options: &InspectOptions,
) -> InspectResult<Vec<SheetReport>> {
    let targets = select_sheets(workbook, options)?;
    info!(sheets = targets.len(), "inspecting workbook");

    // Header rows and maps for every sheet, so cross-sheet labels resolve no
    // matter which sheets are being reported
    let header_rows: HashMap<&str, RowResolution> = workbook
        .sheets()
        .iter()
        .map(|sheet| (sheet.name(), resolve_header_row(sheet, options)))
        .collect();
    let header_maps: HeaderMaps = workbook
        .sheets()
        .iter()
        .map(|sheet| {
            let row = header_rows[sheet.name()].row;
            (sheet.name().to_string(), build_header_map(sheet, row))
        })
        .collect();
    debug!(sheets = header_maps.len(), "built header maps");

    let extractor = ReferenceExtractor::new()?;

    let reports = targets
        .into_iter()
        .map(|sheet| {
            let rows = SheetRows {
                header: header_rows[sheet.name()],
                data: resolve_data_row(sheet, options),
            };
            debug!(
                sheet = %sheet.name(),
                header_row = rows.header.row,
                data_row = rows.data.row,
                "resolved rows"
            );
            analyze_sheet(
                sheet,
                rows,
                &header_maps,
                &extractor,
                options.scan_all_formulas,
            )
        })
        .collect();

    Ok(reports)
}

/// Sheets to report on, in workbook order
fn select_sheets<'a>(
    workbook: &'a Workbook,
    options: &InspectOptions,
) -> InspectResult<Vec<&'a Sheet>> {
    if workbook.is_empty() {
        return Err(InspectError::EmptyWorkbook);
    }

    if options.all_sheets {
        return Ok(workbook.sheets().iter().collect());
    }

    match &options.sheet {
        Some(name) => workbook
            .sheet(name)
            .map(|sheet| vec![sheet])
            .ok_or_else(|| InspectError::SheetNotFound {
                name: name.clone(),
                available: workbook.sheet_names(),
            }),
        None => Ok(workbook.sheets().iter().take(1).collect()),
    }
}

fn resolve_header_row(sheet: &Sheet, options: &InspectOptions) -> RowResolution {
    if options.auto_header_row {
        RowResolution::auto(find_header_row(sheet, options.header_search_rows))
    } else {
        RowResolution::manual(options.header_row)
    }
}

fn resolve_data_row(sheet: &Sheet, options: &InspectOptions) -> RowResolution {
    if !options.detect_data_row() {
        return RowResolution::manual(options.data_row);
    }
    match find_first_formula_row(sheet) {
        Some(row) => RowResolution::auto(row),
        None => {
            debug!(sheet = %sheet.name(), "no formulas found, using default data row");
            RowResolution::fallback(options.data_row)
        }
    }
}
