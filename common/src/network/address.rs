//! # Address validation
//!
//! Raw input is only ever turned into [`IpAddr`] here. Anything that does not
//! parse as a plain IPv4 or IPv6 literal is rejected before it can reach a
//! prober.

use std::collections::HashSet;
use std::net::IpAddr;

use crate::error::AddressError;

/// Validated, deduplicated targets plus the raw entries that were thrown away.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetList {
    pub addresses: Vec<IpAddr>,
    pub rejected: Vec<String>,
}

impl TargetList {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }
}

pub fn validate(s: &str) -> bool {
    parse(s).is_ok()
}

pub fn parse(s: &str) -> Result<IpAddr, AddressError> {
    s.parse::<IpAddr>()
        .map_err(|_| AddressError::Invalid(s.to_string()))
}

/// Filters raw entries into a [`TargetList`], keeping the first occurrence of
/// every address in input order. Blank entries are dropped silently.
pub fn collect_targets<I, S>(raw: I) -> TargetList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<IpAddr> = HashSet::new();
    let mut targets = TargetList::default();

    for entry in raw {
        let entry: &str = entry.as_ref().trim();
        if entry.is_empty() {
            continue;
        }
        match parse(entry) {
            Ok(ip) => {
                if seen.insert(ip) {
                    targets.addresses.push(ip);
                }
            }
            Err(_) => targets.rejected.push(entry.to_string()),
        }
    }

    targets
}

/// Removes repeated addresses, keeping the first occurrence.
pub fn dedup(addresses: &[IpAddr]) -> Vec<IpAddr> {
    let mut seen: HashSet<IpAddr> = HashSet::with_capacity(addresses.len());
    addresses
        .iter()
        .copied()
        .filter(|ip| seen.insert(*ip))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn accepts_ipv4_and_ipv6_literals() {
        for valid in [
            "8.8.8.8",
            "0.0.0.0",
            "255.255.255.255",
            "192.168.1.10",
            "::1",
            "::",
            "fe80::1",
            "2606:4700:4700::1111",
            "2001:db8:0:0:0:0:0:1",
            "::ffff:192.0.2.1",
        ] {
            assert!(validate(valid), "{valid} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_literals() {
        for invalid in [
            "999.999.999.999",
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.a",
            "abc",
            "",
            " 8.8.8.8",
            "8.8.8.8/24",
            "2001:db8::g",
            "1::2::3",
            "example.com",
        ] {
            assert!(!validate(invalid), "{invalid:?} should be rejected");
        }
    }

    #[test]
    fn parse_reports_offending_input() {
        assert_eq!(
            parse("999.999.999.999"),
            Err(AddressError::Invalid("999.999.999.999".to_string()))
        );
    }

    #[test]
    fn collect_targets_dedups_in_input_order() {
        let targets = collect_targets([
            "10.0.0.2",
            " 10.0.0.1 ",
            "junk",
            "",
            "10.0.0.2",
            "::1",
        ]);

        assert_eq!(
            targets.addresses,
            vec![
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
                "::1".parse::<IpAddr>().unwrap(),
            ]
        );
        assert_eq!(targets.rejected, vec!["junk".to_string()]);
        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let b = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(dedup(&[b, a, b, a]), vec![b, a]);
    }
}
