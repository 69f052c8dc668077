#![cfg(test)]
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pingr_common::config::RunConfig;
use pingr_common::error::ConfigError;
use pingr_common::network::address;
use pingr_common::record::{ProbeOutcome, ProbeRecord, Status, UNRESOLVABLE};
use pingr_core::scheduler::ProgressCallback;
use pingr_core::sweep::SweepService;

use crate::stubs::{Behaviour, TableProber, TableResolver};

fn ip(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 20, 30, last))
}

fn run_cfg(retries: u32, concurrency: usize) -> RunConfig {
    RunConfig::new(Duration::from_secs(1), 1, retries, concurrency).unwrap()
}

/// Every address answers after a short, address dependent pause so completion
/// order differs from input order.
fn staggered(addresses: &[IpAddr]) -> HashMap<IpAddr, Behaviour> {
    addresses
        .iter()
        .enumerate()
        .map(|(i, addr)| {
            let pause = Duration::from_millis(2 + ((addresses.len() - i) as u64 % 9));
            let outcome = ProbeOutcome::active(Some(i as f64));
            (*addr, Behaviour::Sleep(pause, outcome))
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_returns_every_address_in_input_order() {
    let addresses: Vec<IpAddr> = (1..=40).rev().map(ip).collect();
    let prober = Arc::new(TableProber::new(staggered(&addresses)));
    let service = SweepService::new(prober.clone(), None);

    let records: Vec<ProbeRecord> = service.run(&addresses, &run_cfg(1, 6)).await.unwrap();

    assert_eq!(records.len(), addresses.len());
    let order: Vec<IpAddr> = records.iter().map(|r| r.address).collect();
    assert_eq!(order, addresses);
    assert!(records.iter().all(|r| r.status == Status::Active));

    let peak = prober.peak.load(Ordering::SeqCst);
    assert!(peak <= 6, "{peak} probes were in flight at once");
}

#[tokio::test]
async fn panicking_probe_only_affects_its_address() {
    let addresses = vec![ip(1), ip(2), ip(3)];
    let table = HashMap::from([
        (ip(1), Behaviour::Answer(ProbeOutcome::active(Some(2.0)))),
        (ip(2), Behaviour::Panic),
        (ip(3), Behaviour::Answer(ProbeOutcome::from(Status::Unreachable))),
    ]);
    let service = SweepService::new(Arc::new(TableProber::new(table)), None);

    let records = service.run(&addresses, &run_cfg(1, 3)).await.unwrap();

    assert_eq!(records[0].status, Status::Active);
    assert!(
        matches!(&records[1].status, Status::ProbeError(detail) if detail.contains("exploded")),
        "got {:?}",
        records[1].status
    );
    assert_eq!(records[1].latency_ms, None);
    assert_eq!(records[2].status, Status::Unreachable);
}

#[tokio::test]
async fn retries_until_first_success_within_budget() {
    let table = HashMap::from([
        (ip(1), Behaviour::FlakyThen(2, Status::Timeout, Some(9.5))),
        (ip(2), Behaviour::FlakyThen(5, Status::Unreachable, Some(1.0))),
    ]);
    let prober = Arc::new(TableProber::new(table));
    let service = SweepService::new(prober.clone(), None);

    let records = service.run(&[ip(1), ip(2)], &run_cfg(3, 2)).await.unwrap();

    assert_eq!(records[0].status, Status::Active);
    assert_eq!(records[0].latency_ms, Some(9.5));
    assert_eq!(prober.calls(ip(1)), 3);

    assert_eq!(records[1].status, Status::Unreachable);
    assert_eq!(records[1].latency_ms, None);
    assert_eq!(prober.calls(ip(2)), 3);
}

#[tokio::test]
async fn repeated_runs_agree_except_for_timestamps() {
    let addresses: Vec<IpAddr> = (1..=12).map(ip).collect();
    let table: HashMap<IpAddr, Behaviour> = addresses
        .iter()
        .map(|addr| {
            let outcome = match addr {
                IpAddr::V4(v4) if v4.octets()[3] % 3 == 0 => ProbeOutcome::from(Status::Timeout),
                _ => ProbeOutcome::active(Some(3.25)),
            };
            (*addr, Behaviour::Answer(outcome))
        })
        .collect();
    let names = HashMap::from([(ip(1), "one.lan".to_string()), (ip(4), "four.lan".to_string())]);
    let service = SweepService::new(
        Arc::new(TableProber::new(table)),
        Some(Arc::new(TableResolver { names })),
    );
    let cfg = run_cfg(2, 4);

    let first = service.run(&addresses, &cfg).await.unwrap();
    let second = service.run(&addresses, &cfg).await.unwrap();

    let strip = |records: &[ProbeRecord]| -> Vec<(IpAddr, Status, Option<f64>, String)> {
        records
            .iter()
            .map(|r| {
                let (address, status, latency, hostname) = r.without_timestamp();
                (address, status.clone(), latency, hostname.to_string())
            })
            .collect()
    };
    assert_eq!(strip(&first), strip(&second));
    assert_eq!(first[0].hostname, "one.lan");
    assert_eq!(first[1].hostname, UNRESOLVABLE);
}

#[tokio::test]
async fn empty_target_set_is_a_config_error() {
    let prober = Arc::new(TableProber::new(HashMap::new()));
    let service = SweepService::new(prober.clone(), None);

    let raw = ["", "   ", "not-an-ip", "300.1.1.1"];
    let targets = address::collect_targets(raw);
    assert!(targets.is_empty());
    assert_eq!(targets.rejected.len(), 2);

    let result = service.run(&targets.addresses, &run_cfg(1, 1)).await;
    assert_eq!(result, Err(ConfigError::NoTargets));
    assert_eq!(prober.total_calls(), 0);
}

#[tokio::test]
async fn disabled_dns_reports_unresolvable() {
    let service = SweepService::new(Arc::new(TableProber::new(HashMap::new())), None);

    let records = service.run(&[ip(7), ip(8)], &run_cfg(1, 2)).await.unwrap();

    assert!(records.iter().all(|r| r.hostname == UNRESOLVABLE));
    assert!(records.iter().all(|r| r.status == Status::Inactive));
}

#[tokio::test]
async fn progress_observer_sees_every_completion() {
    let addresses: Vec<IpAddr> = (1..=25).map(ip).collect();
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let observer: ProgressCallback = Arc::new(move |done, total| {
        assert_eq!(total, 25);
        sink.lock().unwrap().push(done);
    });

    let service = SweepService::new(Arc::new(TableProber::new(staggered(&addresses))), None)
        .with_progress(observer);
    service.run(&addresses, &run_cfg(1, 5)).await.unwrap();

    let mut seen = seen.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, (1..=25).collect::<Vec<usize>>());
}
