//! The **abstraction** over a single reachability check.
//!
//! Higher layers (retry policy, scheduler) depend on the [`Prober`] trait only,
//! so tests can swap the system `ping` for scripted stubs.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use pingr_common::record::ProbeOutcome;

mod output;
mod system;

pub use output::{Platform, classify, parse_latency};
pub use system::SystemProber;

/// Runs one reachability check against one address.
///
/// Implementations report every failure through the returned
/// [`ProbeOutcome`]; nothing is propagated as an error.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: IpAddr, timeout: Duration, packet_count: u32) -> ProbeOutcome;
}
