//! # Probe result model
//!
//! [`Status`] is the closed taxonomy every probe ends up in, [`ProbeOutcome`]
//! pairs it with the measured latency and [`ProbeRecord`] is the per-address row
//! handed to reporting.

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Hostname reported when a reverse lookup yields nothing usable.
pub const UNRESOLVABLE: &str = "Unresolvable";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Active,
    Inactive,
    Unreachable,
    Timeout,
    UnknownHost,
    InvalidAddress,
    /// The ping utility could not be run or failed in an unexpected way.
    ProbeError(String),
    /// No outcome was collected for the address.
    Skipped,
}

impl Status {
    /// Label without the error detail, used to group records in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Unreachable => "Unreachable",
            Status::Timeout => "Timeout",
            Status::UnknownHost => "Unknown Host",
            Status::InvalidAddress => "Invalid Address",
            Status::ProbeError(_) => "Error",
            Status::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::ProbeError(detail) => write!(f, "Error: {detail}"),
            other => f.write_str(other.label()),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of probing one address. Latency is only ever attached to
/// [`Status::Active`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    status: Status,
    latency_ms: Option<f64>,
}

impl ProbeOutcome {
    pub fn active(latency_ms: Option<f64>) -> Self {
        Self {
            status: Status::Active,
            latency_ms,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.latency_ms
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn into_parts(self) -> (Status, Option<f64>) {
        (self.status, self.latency_ms)
    }
}

impl From<Status> for ProbeOutcome {
    fn from(status: Status) -> Self {
        Self {
            status,
            latency_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeRecord {
    #[serde(rename = "IP Address")]
    pub address: IpAddr,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Latency (ms)")]
    pub latency_ms: Option<f64>,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Local>,
}

impl ProbeRecord {
    pub fn new(address: IpAddr, outcome: ProbeOutcome, hostname: String) -> Self {
        let (status, latency_ms) = outcome.into_parts();
        Self {
            address,
            status,
            latency_ms,
            hostname,
            timestamp: Local::now(),
        }
    }

    /// Same record with the capture time left out, for comparing runs.
    pub fn without_timestamp(&self) -> (IpAddr, &Status, Option<f64>, &str) {
        (self.address, &self.status, self.latency_ms, &self.hostname)
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
