//! Target list loading.
//!
//! `.xlsx` and `.csv` files are read through the `IP Address` column (any
//! case), falling back to the first column. For workbooks only the first sheet
//! is read. Anything else is read as plain text, one address per line, `#`
//! starting a comment line.

use std::fs;
use std::path::Path;

use anyhow::Context;
use calamine::{Data, Reader, Xlsx, open_workbook};
use pingr_common::network::address::{self, TargetList};
use rust_xlsxwriter::Workbook;
use tracing::{info, warn};

pub const DEFAULT_INPUT: &str = "ip_list.xlsx";

const ADDRESS_COLUMN: &str = "IP Address";
const SAMPLE_ADDRESSES: &[&str] = &["8.8.8.8", "1.1.1.1"];

pub fn load_targets(path: &Path) -> anyhow::Result<TargetList> {
    let raw: Vec<String> = match Layout::of(path) {
        Layout::Xlsx => read_xlsx_column(path)?,
        Layout::Csv => read_csv_column(path)?,
        Layout::Lines => read_lines(path)?,
    };

    let targets: TargetList = address::collect_targets(&raw);
    for entry in &targets.rejected {
        warn!("Skipping invalid address '{entry}'");
    }
    info!(
        "Loaded {} address(es) from {}",
        targets.len(),
        path.display()
    );

    Ok(targets)
}

/// Writes a small starter list to `path`.
pub fn create_sample(path: &Path) -> anyhow::Result<()> {
    match Layout::of(path) {
        Layout::Xlsx => {
            let mut workbook = Workbook::new();
            let sheet = workbook.add_worksheet();
            sheet.write_string(0, 0, ADDRESS_COLUMN)?;
            for (row, ip) in (1u32..).zip(SAMPLE_ADDRESSES) {
                sheet.write_string(row, 0, *ip)?;
            }
            workbook
                .save(path)
                .with_context(|| format!("creating {}", path.display()))?;
        }
        Layout::Csv => {
            let mut wtr = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            wtr.write_record([ADDRESS_COLUMN])?;
            for ip in SAMPLE_ADDRESSES {
                wtr.write_record([*ip])?;
            }
            wtr.flush()?;
        }
        Layout::Lines => {
            let mut body: String = String::from("# one address per line\n");
            for ip in SAMPLE_ADDRESSES {
                body.push_str(ip);
                body.push('\n');
            }
            fs::write(path, body).with_context(|| format!("creating {}", path.display()))?;
        }
    }

    info!("Created sample input file: {}", path.display());
    Ok(())
}

enum Layout {
    Xlsx,
    Csv,
    Lines,
}

impl Layout {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Layout::Xlsx,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Layout::Csv,
            _ => Layout::Lines,
        }
    }
}

fn read_xlsx_column(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("opening {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("{} has no worksheet", path.display()))?
        .with_context(|| format!("reading {}", path.display()))?;

    let mut rows = range.rows();
    let column: usize = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| cell.to_string().eq_ignore_ascii_case(ADDRESS_COLUMN))
        })
        .unwrap_or(0);

    Ok(rows
        .filter_map(|row| match row.get(column) {
            Some(Data::Empty) | None => None,
            Some(cell) => Some(cell.to_string()),
        })
        .collect())
}

fn read_csv_column(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let column: usize = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .position(|name| name.eq_ignore_ascii_case(ADDRESS_COLUMN))
        .unwrap_or(0);

    let mut raw: Vec<String> = Vec::new();
    for row in rdr.records() {
        let row = row.with_context(|| format!("reading {}", path.display()))?;
        if let Some(cell) = row.get(column) {
            raw.push(cell.to_string());
        }
    }
    Ok(raw)
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let text: String =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
