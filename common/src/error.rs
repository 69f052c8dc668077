use std::net::IpAddr;

use thiserror::Error;

/// Faults that abort a run before any probe is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("timeout must be greater than zero seconds")]
    ZeroTimeout,
    #[error("packet count must be greater than zero")]
    ZeroPacketCount,
    #[error("retry budget must be at least 1")]
    ZeroRetryBudget,
    #[error("concurrency limit must be greater than zero")]
    ZeroConcurrency,
    #[error("no valid addresses to probe")]
    NoTargets,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("'{0}' is not a valid IPv4 or IPv6 address")]
    Invalid(String),
    #[error("subnet enumeration needs an IPv4 address, got {0}")]
    NotIpv4(IpAddr),
}
