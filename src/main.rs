use clap::Parser;
use colored::Colorize;
use sheet_inspect::cli::{self, InspectOptions, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-inspect")]
#[command(about = "Inspect headers and formulas in a pricing workbook.")]
#[command(long_about = "sheet-inspect - header, formula and dependency overview for spreadsheets

Reads the workbook read-only and prints, for each sheet, the header labels,
the formulas of one data row and which columns those formulas depend on.

DEPENDENCIES:
  Same-sheet:   Cost (B)
  Cross-sheet:  Rates!A (Markup)

  References are found lexically (A1, $B$2, Sheet!C3, 'My Sheet'!D:E);
  formulas are never evaluated.

EXAMPLES:
  sheet-inspect --file pricing.xlsx
  sheet-inspect --file pricing.xlsx --sheet Quotes --auto-header-row --auto-data-row
  sheet-inspect --file pricing.xlsx --all-sheets --scan-all-formulas
  sheet-inspect --file pricing.xlsx --all-sheets --format json")]
#[command(version)]
struct Cli {
    /// Path to the Excel file to inspect
    #[arg(long, env = "SHEET_INSPECT_FILE", default_value = "CareNTour_Pricing_Tool.xlsx")]
    file: PathBuf,

    /// Sheet name to inspect (defaults to the first worksheet)
    #[arg(long, env = "SHEET_INSPECT_SHEET", conflicts_with = "all_sheets")]
    sheet: Option<String>,

    /// Header row number
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    header_row: u32,

    /// First data row number
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    data_row: u32,

    /// Auto-detect the header row based on filled cells
    #[arg(long)]
    auto_header_row: bool,

    /// Auto-detect the first row that contains formulas
    #[arg(long)]
    auto_data_row: bool,

    /// Rows to scan when auto-detecting the header row
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    header_search_rows: u32,

    /// Analyze all sheets in the workbook (implies --auto-data-row)
    #[arg(long)]
    all_sheets: bool,

    /// Build a dependency graph using all formula cells in each sheet
    #[arg(long)]
    scan_all_formulas: bool,

    /// Report format
    #[arg(long, value_enum, env = "SHEET_INSPECT_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for InspectOptions {
    fn from(cli: Cli) -> Self {
        Self {
            file: cli.file,
            sheet: cli.sheet,
            all_sheets: cli.all_sheets,
            header_row: cli.header_row,
            data_row: cli.data_row,
            auto_header_row: cli.auto_header_row,
            header_search_rows: cli.header_search_rows,
            auto_data_row: cli.auto_data_row,
            scan_all_formulas: cli.scan_all_formulas,
            format: cli.format,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sheet_inspect=debug"
    } else {
        "sheet_inspect=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = InspectOptions::from(cli);
    let stdout = std::io::stdout();
    if let Err(e) = cli::inspect(&options, &mut stdout.lock()) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
