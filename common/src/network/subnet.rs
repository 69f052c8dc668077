use std::net::{IpAddr, Ipv4Addr};

use pnet::ipnetwork::Ipv4Network;

use crate::error::AddressError;

const SWEEP_PREFIX: u8 = 24;

/// Every host address of the /24 that contains `ip`, without the network and
/// broadcast addresses.
pub fn hosts_in_slash24(ip: IpAddr) -> Result<Vec<IpAddr>, AddressError> {
    let IpAddr::V4(ipv4) = ip else {
        return Err(AddressError::NotIpv4(ip));
    };

    let network = Ipv4Network::new(ipv4, SWEEP_PREFIX)
        .map_err(|_| AddressError::Invalid(ip.to_string()))?;
    let network_addr: Ipv4Addr = network.network();
    let broadcast_addr: Ipv4Addr = network.broadcast();

    Ok(network
        .iter()
        .filter(|host| *host != network_addr && *host != broadcast_addr)
        .map(IpAddr::V4)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    #[test]
    fn slash24_has_254_hosts() {
        let hosts = hosts_in_slash24(v4(192, 168, 1, 10)).unwrap();

        assert_eq!(hosts.len(), 254);
        assert!(hosts.contains(&v4(192, 168, 1, 1)));
        assert!(hosts.contains(&v4(192, 168, 1, 254)));
        assert!(!hosts.contains(&v4(192, 168, 1, 0)));
        assert!(!hosts.contains(&v4(192, 168, 1, 255)));
    }

    #[test]
    fn slash24_is_ordered_and_stays_in_network() {
        let hosts = hosts_in_slash24(v4(10, 20, 30, 255)).unwrap();
        assert_eq!(hosts.first(), Some(&v4(10, 20, 30, 1)));
        assert_eq!(hosts.last(), Some(&v4(10, 20, 30, 254)));
    }

    #[test]
    fn slash24_rejects_ipv6() {
        let ip: IpAddr = "fe80::1".parse().unwrap();
        assert_eq!(hosts_in_slash24(ip), Err(AddressError::NotIpv4(ip)));
    }
}
