#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use pingr_common::config::RunConfig;
use pingr_common::record::{Status, UNRESOLVABLE};
use pingr_core::prober::SystemProber;
use pingr_core::sweep::SweepService;

/// Needs a working `ping` binary.
#[tokio::test]
#[ignore]
async fn sweep_single_loopback() {
    let cfg: RunConfig = RunConfig::new(Duration::from_secs(1), 1, 2, 4).unwrap();
    let service = SweepService::new(Arc::new(SystemProber::new()), None);
    let localhost: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    let records = service.run(&[localhost], &cfg).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, localhost);
    assert_eq!(records[0].status, Status::Active, "loopback did not answer");
    assert_eq!(records[0].hostname, UNRESOLVABLE);
}

/// Needs a working `ping` binary.
#[tokio::test]
#[ignore]
async fn sweep_loopback_range_keeps_order() {
    let cfg: RunConfig = RunConfig::new(Duration::from_secs(1), 1, 1, 8).unwrap();
    let service = SweepService::new(Arc::new(SystemProber::new()), None);
    let targets: Vec<IpAddr> = (1..=5)
        .rev()
        .map(|last| IpAddr::V4(Ipv4Addr::new(127, 0, 0, last)))
        .collect();

    let records = service.run(&targets, &cfg).await.unwrap();

    let order: Vec<IpAddr> = records.iter().map(|r| r.address).collect();
    assert_eq!(order, targets);
}

#[tokio::test]
async fn invalid_literal_never_reaches_the_ping_utility() {
    let service = SweepService::new(Arc::new(SystemProber::new()), None);

    let outcome = service
        .check_literal("192.168.1", &RunConfig::default())
        .await;

    assert_eq!(outcome.status(), &Status::InvalidAddress);
    assert_eq!(outcome.latency_ms(), None);
}
