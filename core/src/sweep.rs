//! One complete pass of the pipeline: probe, resolve, aggregate.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use pingr_common::config::RunConfig;
use pingr_common::error::ConfigError;
use pingr_common::network::address;
use pingr_common::record::{ProbeOutcome, ProbeRecord, Status};
use tracing::{debug, info};

use crate::aggregator;
use crate::prober::Prober;
use crate::resolver::{self, HostnameResolver};
use crate::retry;
use crate::scheduler::{ProgressCallback, Scheduler};

pub struct SweepService {
    prober: Arc<dyn Prober>,
    resolver: Option<Arc<dyn HostnameResolver>>,
    on_progress: Option<ProgressCallback>,
}

impl SweepService {
    /// Without a resolver every record is reported as unresolvable.
    pub fn new(prober: Arc<dyn Prober>, resolver: Option<Arc<dyn HostnameResolver>>) -> Self {
        Self {
            prober,
            resolver,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub async fn run(&self, addresses: &[IpAddr], cfg: &RunConfig) -> Result<Vec<ProbeRecord>, ConfigError> {
        if addresses.is_empty() {
            return Err(ConfigError::NoTargets);
        }

        let targets: Vec<IpAddr> = address::dedup(addresses);
        if targets.len() != addresses.len() {
            debug!("Dropped {} duplicate address(es)", addresses.len() - targets.len());
        }
        info!(
            "Sweeping {} address(es), {} in flight, timeout {}s",
            targets.len(),
            cfg.concurrency(),
            cfg.timeout().as_secs_f64()
        );

        let mut scheduler: Scheduler = Scheduler::new(self.prober.clone());
        if let Some(callback) = &self.on_progress {
            scheduler = scheduler.with_progress(callback.clone());
        }

        let (outcomes, hostnames) = tokio::join!(
            scheduler.run_all(&targets, cfg),
            self.resolve(&targets, cfg.concurrency())
        );

        Ok(aggregator::aggregate(&targets, outcomes, hostnames))
    }

    /// Probes a single raw address string. Anything that is not an IP literal
    /// is reported as [`Status::InvalidAddress`] without invoking the prober.
    pub async fn check_literal(&self, raw: &str, cfg: &RunConfig) -> ProbeOutcome {
        match address::parse(raw.trim()) {
            Ok(ip) => retry::probe_with_retry(self.prober.as_ref(), ip, cfg).await,
            Err(e) => {
                debug!("{e}");
                ProbeOutcome::from(Status::InvalidAddress)
            }
        }
    }

    /// Reverse lookup for one address, if a resolver is configured.
    pub async fn hostname_of(&self, ip: IpAddr) -> Option<String> {
        match &self.resolver {
            Some(resolver) => Some(resolver.resolve(ip).await),
            None => None,
        }
    }

    async fn resolve(&self, targets: &[IpAddr], concurrency: usize) -> HashMap<IpAddr, String> {
        match &self.resolver {
            Some(resolver) => resolver::resolve_all(resolver.clone(), targets, concurrency).await,
            None => HashMap::new(),
        }
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
