use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use anyhow::Context;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

/// Address used to ask the routing table for the outbound interface.
/// Connecting a UDP socket sends nothing.
const ROUTE_PROBE_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::new(192, 0, 2, 1), 53);

/// Primary IPv4 address of this machine, used as the base for local /24 sweeps.
///
/// Prefers a private address on an interface that is up, falls back to any
/// non-loopback IPv4 and finally to whatever source address the routing table
/// picks for outbound traffic.
pub fn local_ipv4() -> anyhow::Result<Ipv4Addr> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    if let Some(ip) = pick_ipv4(&interfaces) {
        return Ok(ip);
    }

    route_source_ipv4().context("Failed to detect a local IPv4 address")
}

fn pick_ipv4(interfaces: &[NetworkInterface]) -> Option<Ipv4Addr> {
    let candidates: Vec<Ipv4Addr> = interfaces
        .iter()
        .filter(|intf| intf.is_up() && !intf.is_loopback())
        .flat_map(|intf| intf.ips.iter())
        .filter_map(|net| match net {
            IpNetwork::V4(v4) if !v4.ip().is_loopback() && !v4.ip().is_link_local() => {
                Some(v4.ip())
            }
            _ => None,
        })
        .collect();

    candidates
        .iter()
        .find(|ip| ip.is_private())
        .or_else(|| candidates.first())
        .copied()
}

fn route_source_ipv4() -> anyhow::Result<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect(ROUTE_PROBE_ADDR)?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Ok(ip),
        other => anyhow::bail!("routing table returned unusable source address {other}"),
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
