use std::collections::HashMap;
use std::net::IpAddr;

use pingr_common::record::{ProbeOutcome, ProbeRecord, Status, UNRESOLVABLE};
use tracing::warn;

/// Folds probe outcomes and hostnames into one record per address, in the
/// order of `addresses`.
///
/// An address without an outcome is reported as [`Status::Skipped`]; one
/// without a hostname as [`UNRESOLVABLE`].
pub fn aggregate(
    addresses: &[IpAddr],
    mut outcomes: HashMap<IpAddr, ProbeOutcome>,
    mut hostnames: HashMap<IpAddr, String>,
) -> Vec<ProbeRecord> {
    addresses
        .iter()
        .map(|&address| {
            let outcome: ProbeOutcome = outcomes.remove(&address).unwrap_or_else(|| {
                warn!("No outcome collected for {address}");
                ProbeOutcome::from(Status::Skipped)
            });
            let hostname: String = hostnames
                .remove(&address)
                .unwrap_or_else(|| UNRESOLVABLE.to_string());

            ProbeRecord::new(address, outcome, hostname)
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
