use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use csv::Writer;
use pingr_common::record::ProbeRecord;
use pingr_common::utils;
use rust_xlsxwriter::Workbook;
use tracing::{error, info};

pub const DEFAULT_OUTPUT: &str = "ping_results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Format {
    Xlsx,
    Csv,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Xlsx => "xlsx",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

/// `<base>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn output_path(base: &str, at: &DateTime<Local>, format: Format) -> PathBuf {
    PathBuf::from(format!(
        "{base}_{}.{}",
        utils::timestamp_tag(at),
        format.extension()
    ))
}

/// Writes one file per format and returns the paths that were written.
/// A failing format is logged and does not stop the others.
pub fn save_results(records: &[ProbeRecord], base: &str, formats: &[Format]) -> Vec<PathBuf> {
    let now: DateTime<Local> = Local::now();
    let mut written: Vec<PathBuf> = Vec::with_capacity(formats.len());

    for &format in formats {
        let path: PathBuf = output_path(base, &now, format);
        let result: anyhow::Result<()> = match format {
            Format::Xlsx => write_xlsx(&path, records),
            Format::Csv => write_csv(&path, records),
            Format::Json => write_json(&path, records),
        };

        match result {
            Ok(()) => {
                info!(
                    "Saved {} results to {}",
                    format.extension().to_uppercase(),
                    path.display()
                );
                written.push(path);
            }
            Err(e) => error!("Error saving {}: {e:#}", format.extension()),
        }
    }

    written
}

const COLUMNS: [&str; 5] = ["IP Address", "Status", "Latency (ms)", "Hostname", "Timestamp"];
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Same columns as the CSV report; an unknown latency is left as a blank cell.
fn write_xlsx(path: &Path, records: &[ProbeRecord]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, title) in (0u16..).zip(COLUMNS) {
        sheet.write_string(0, col, title)?;
    }
    for (row, record) in (1u32..).zip(records) {
        sheet.write_string(row, 0, record.address.to_string())?;
        sheet.write_string(row, 1, record.status.to_string())?;
        if let Some(ms) = record.latency_ms {
            sheet.write_number(row, 2, ms)?;
        }
        sheet.write_string(row, 3, record.hostname.as_str())?;
        sheet.write_string(row, 4, record.timestamp.format(TIME_FORMAT).to_string())?;
    }

    workbook
        .save(path)
        .with_context(|| format!("creating {}", path.display()))?;
    Ok(())
}

fn write_csv(path: &Path, records: &[ProbeRecord]) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut wtr = Writer::from_writer(BufWriter::new(f));

    wtr.write_record(COLUMNS)?;
    for record in records {
        let latency: String = record
            .latency_ms
            .map(|ms| ms.to_string())
            .unwrap_or_default();
        wtr.write_record([
            record.address.to_string(),
            record.status.to_string(),
            latency,
            record.hostname.clone(),
            record.timestamp.format(TIME_FORMAT).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_json(path: &Path, records: &[ProbeRecord]) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, records)?;
    w.flush()?;
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
