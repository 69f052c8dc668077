use std::net::IpAddr;

use pingr_common::config::RunConfig;
use pingr_common::record::ProbeOutcome;
use tracing::debug;

use crate::prober::Prober;

/// Probes `address` up to `retry_budget` times, one attempt after the other,
/// and stops at the first `Active` outcome.
///
/// When every attempt fails the outcome of the *last* attempt is returned,
/// latency included.
pub async fn probe_with_retry(prober: &dyn Prober, address: IpAddr, cfg: &RunConfig) -> ProbeOutcome {
    let mut attempt: u32 = 1;
    loop {
        let outcome: ProbeOutcome = prober
            .probe(address, cfg.timeout(), cfg.packet_count())
            .await;

        if outcome.is_active() || attempt >= cfg.retry_budget() {
            return outcome;
        }

        debug!(
            "{address}: attempt {attempt}/{} returned {}, retrying",
            cfg.retry_budget(),
            outcome.status()
        );
        attempt += 1;
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
