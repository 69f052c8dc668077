use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use colored::*;
use pingr_common::config::Config;
use pingr_common::record::{ProbeRecord, Status, UNRESOLVABLE};

use crate::pprint;
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

/// Per-status tallies of one sweep.
#[derive(Debug, PartialEq)]
pub struct Summary {
    /// Status label and count, largest count first, ties by label.
    pub counts: Vec<(&'static str, usize)>,
    pub total: usize,
    pub active: usize,
}

impl Summary {
    /// Share of `Active` records in percent, 0 for an empty sweep.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.active as f64 / self.total as f64 * 100.0
    }
}

pub fn summarize(records: &[ProbeRecord]) -> Summary {
    let mut tally: HashMap<&'static str, usize> = HashMap::new();
    for record in records {
        *tally.entry(record.status.label()).or_default() += 1;
    }

    let active: usize = tally.get(Status::Active.label()).copied().unwrap_or(0);
    let mut counts: Vec<(&'static str, usize)> = tally.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Summary {
        counts,
        total: records.len(),
        active,
    }
}

pub fn sweep_ends(records: &[ProbeRecord], total_time: Duration, cfg: &Config) {
    if records.is_empty() {
        print::header("zero hosts probed", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("sweep results", cfg.quiet);
    if cfg.quiet < 2 {
        print_hosts(records);
    }
    print_summary(&summarize(records), total_time, cfg);
}

fn print_hosts(records: &[ProbeRecord]) {
    for (idx, record) in records.iter().enumerate() {
        print_host_tree(record, idx);
        if idx + 1 != records.len() {
            pprint!();
        }
    }
}

pub fn print_host_tree(record: &ProbeRecord, idx: usize) {
    let title: String = match record.hostname.as_str() {
        UNRESOLVABLE => record.address.to_string(),
        name => name.to_string(),
    };
    print::tree_head(idx, &title);

    let details: Vec<Detail> = vec![
        ("Address".to_string(), address_value(&record.address)),
        ("Status".to_string(), status_value(&record.status)),
        ("Latency".to_string(), latency_value(record.latency_ms)),
        ("Host".to_string(), hostname_value(&record.hostname)),
        (
            "Time".to_string(),
            record.timestamp.format("%H:%M:%S").to_string().color(colors::TEXT_DEFAULT),
        ),
    ];

    print::as_tree_one_level(details);
}

fn print_summary(summary: &Summary, total_time: Duration, cfg: &Config) {
    if cfg.quiet == 0 {
        print::fat_separator();
    } else {
        pprint!();
    }

    for (label, count) in &summary.counts {
        print::print_status(format!(
            "{}: {}",
            label.color(label_color(label)),
            count.to_string().bold()
        ));
    }

    let rate: ColoredString = format!("{:.2}%", summary.success_rate()).green().bold();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).yellow().bold();
    let line: String = format!(
        "Total: {} | Success Rate: {} | {}",
        summary.total.to_string().bold(),
        rate,
        elapsed
    );

    match cfg.quiet {
        0 => print::centerln(&line),
        _ => print::print_status(line),
    }
}

fn address_value(address: &IpAddr) -> ColoredString {
    match address {
        IpAddr::V4(v4) => v4.to_string().color(colors::IPV4_ADDR),
        IpAddr::V6(v6) => v6.to_string().color(colors::IPV6_ADDR),
    }
}

pub fn status_value(status: &Status) -> ColoredString {
    status.to_string().color(label_color(status.label())).bold()
}

pub fn latency_value(latency_ms: Option<f64>) -> ColoredString {
    match latency_ms {
        Some(ms) => format!("{ms:.2} ms").color(colors::LATENCY),
        None => "-".color(colors::SEPARATOR),
    }
}

pub fn hostname_value(hostname: &str) -> ColoredString {
    match hostname {
        UNRESOLVABLE => hostname.color(colors::SEPARATOR),
        name => name.color(colors::HOSTNAME),
    }
}

fn label_color(label: &str) -> Color {
    match label {
        "Active" => colors::STATUS_ACTIVE,
        "Timeout" => colors::STATUS_TIMEOUT,
        "Unreachable" => colors::STATUS_UNREACHABLE,
        "Inactive" => colors::STATUS_INACTIVE,
        _ => colors::STATUS_OTHER,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
