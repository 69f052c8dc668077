pub mod check;
pub mod sweep;

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use pingr_common::config::{
    DEFAULT_CONCURRENCY, DEFAULT_PACKET_COUNT, DEFAULT_RETRY_BUDGET, DEFAULT_TIMEOUT, RunConfig,
};
use pingr_common::error::ConfigError;
use pingr_core::prober::SystemProber;
use pingr_core::resolver::{DnsResolver, HostnameResolver};
use pingr_core::sweep::SweepService;

use crate::io::output::{DEFAULT_OUTPUT, Format};

#[derive(Parser)]
#[command(name = "pingr", version)]
#[command(about = "Parallel ping sweeper with reverse DNS and file reports.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Skip reverse DNS lookups
    #[arg(long, global = true)]
    pub no_dns: bool,

    /// Less output, repeat for even less
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not show the network use notice
    #[arg(long, global = true)]
    pub no_disclaimer: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ping every address from a file or from the local /24
    #[command(alias = "s")]
    Sweep(SweepArgs),
    /// Ping a single address
    #[command(alias = "c")]
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TuningArgs {
    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Echo requests per probe
    #[arg(long, default_value_t = DEFAULT_PACKET_COUNT)]
    pub count: u32,

    /// Attempts per address until one succeeds
    #[arg(long, default_value_t = DEFAULT_RETRY_BUDGET)]
    pub retries: u32,

    /// Probes in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub threads: usize,
}

impl TuningArgs {
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        RunConfig::new(
            Duration::from_secs(self.timeout),
            self.count,
            self.retries,
            self.threads,
        )
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Address list: .xlsx or .csv (IP Address column) or plain text
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["discover", "subnet_of"])]
    pub input: Option<PathBuf>,

    /// Sweep the /24 of this machine's primary IPv4 address
    #[arg(long)]
    pub discover: bool,

    /// Sweep the /24 containing this address instead of the local one
    #[arg(long, value_name = "IP")]
    pub subnet_of: Option<IpAddr>,

    /// Base name of the report files
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Report formats to write
    #[arg(long, value_enum, num_args = 1.., default_values_t = [Format::Xlsx])]
    pub formats: Vec<Format>,

    /// Repeat the sweep every N minutes
    #[arg(long, value_name = "MINUTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// IPv4 or IPv6 literal
    pub address: String,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// System ping prober, plus a DNS resolver unless lookups are disabled.
pub fn sweep_service(no_dns: bool) -> SweepService {
    let resolver: Option<Arc<dyn HostnameResolver>> = if no_dns {
        None
    } else {
        Some(Arc::new(DnsResolver::default()))
    };
    SweepService::new(Arc::new(SystemProber::new()), resolver)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
