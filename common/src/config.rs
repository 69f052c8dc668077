use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::utils;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_PACKET_COUNT: u32 = 1;
pub const DEFAULT_RETRY_BUDGET: u32 = 1;
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Upper bound on in-flight probes. Each probe is a child process.
pub const MAX_CONCURRENCY: usize = 512;

/// Extra wall-clock time granted to the ping utility on top of its own timeout
/// before the invocation is abandoned.
pub const PROBE_MARGIN: Duration = Duration::from_secs(1);

pub struct Config {
    /// Skips reverse lookups entirely; every hostname is reported as unresolvable.
    pub no_dns: bool,
    /// 0 prints everything, 1 drops headers and banners, 2 also drops host trees.
    pub quiet: u8,
    pub no_disclaimer: bool,
}

/// Tuning knobs for one sweep.
///
/// The fields are only reachable through [`RunConfig::new`], so a value of this
/// type has always been validated and cannot change once a run has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    timeout: Duration,
    packet_count: u32,
    retry_budget: u32,
    concurrency: usize,
}

impl RunConfig {
    pub fn new(
        timeout: Duration,
        packet_count: u32,
        retry_budget: u32,
        concurrency: usize,
    ) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if packet_count == 0 {
            return Err(ConfigError::ZeroPacketCount);
        }
        if retry_budget == 0 {
            return Err(ConfigError::ZeroRetryBudget);
        }
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let clamped: usize = utils::clamp(concurrency, Some(1), Some(MAX_CONCURRENCY));
        if clamped != concurrency {
            warn!("Concurrency limit {concurrency} lowered to {clamped}");
        }

        Ok(Self {
            timeout,
            packet_count,
            retry_budget,
            concurrency: clamped,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn packet_count(&self) -> u32 {
        self.packet_count
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            packet_count: DEFAULT_PACKET_COUNT,
            retry_budget: DEFAULT_RETRY_BUDGET,
            concurrency: DEFAULT_CONCURRENCY,
        }
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
