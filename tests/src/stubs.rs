#![cfg(test)]
//! Deterministic stand-ins for the ping utility and DNS.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pingr_common::record::{ProbeOutcome, Status, UNRESOLVABLE};
use pingr_core::prober::Prober;
use pingr_core::resolver::HostnameResolver;

/// What a [`TableProber`] does for one address on every call.
#[derive(Clone)]
pub enum Behaviour {
    Answer(ProbeOutcome),
    /// Fails `n` times with the given status, then answers `Active`.
    FlakyThen(u32, Status, Option<f64>),
    Panic,
    Sleep(Duration, ProbeOutcome),
}

pub struct TableProber {
    table: HashMap<IpAddr, Behaviour>,
    calls: Mutex<HashMap<IpAddr, u32>>,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

impl TableProber {
    pub fn new(table: HashMap<IpAddr, Behaviour>) -> Self {
        Self {
            table,
            calls: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self, address: IpAddr) -> u32 {
        self.calls.lock().unwrap().get(&address).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Prober for TableProber {
    async fn probe(&self, address: IpAddr, _timeout: Duration, _count: u32) -> ProbeOutcome {
        let attempt: u32 = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(address).or_insert(0);
            *entry += 1;
            *entry
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let outcome = match self.table.get(&address).cloned() {
            Some(Behaviour::Answer(outcome)) => outcome,
            Some(Behaviour::FlakyThen(failures, status, latency)) => {
                if attempt <= failures {
                    ProbeOutcome::from(status)
                } else {
                    ProbeOutcome::active(latency)
                }
            }
            Some(Behaviour::Panic) => {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                panic!("stub prober exploded on {address}");
            }
            Some(Behaviour::Sleep(pause, outcome)) => {
                tokio::time::sleep(pause).await;
                outcome
            }
            None => ProbeOutcome::from(Status::Inactive),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// Answers from a fixed table, `Unresolvable` for everything else.
pub struct TableResolver {
    pub names: HashMap<IpAddr, String>,
}

#[async_trait]
impl HostnameResolver for TableResolver {
    async fn resolve(&self, address: IpAddr) -> String {
        self.names
            .get(&address)
            .cloned()
            .unwrap_or_else(|| UNRESOLVABLE.to_string())
    }
}
