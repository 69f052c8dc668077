//! # Parallel scheduler
//!
//! Bounded fan-out of per-address work on the tokio runtime.
//!
//! A [`Semaphore`] caps the number of tasks in flight: a permit is taken
//! *before* a task is spawned, so excess addresses wait in the dispatch loop
//! until a slot frees. Every unit of work runs inside its own spawned task,
//! which turns a panic into a [`JoinError`] that is mapped to a per-address
//! fault value instead of tearing down the run. Results are collected keyed by
//! address; completion order carries no meaning.

use std::collections::HashMap;
use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pingr_common::config::RunConfig;
use pingr_common::record::{ProbeOutcome, Status};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, warn};

use crate::prober::Prober;
use crate::retry;

/// Progress observer, called with `(completed, total)` after every finished task.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

pub struct Scheduler {
    prober: Arc<dyn Prober>,
    on_progress: Option<ProgressCallback>,
}

impl Scheduler {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    /// Probes every address (with retries) under the configured concurrency
    /// limit and waits for all of them.
    ///
    /// `addresses` is expected to be free of duplicates; a repeated address is
    /// probed more than once but only one outcome survives.
    pub async fn run_all(&self, addresses: &[IpAddr], cfg: &RunConfig) -> HashMap<IpAddr, ProbeOutcome> {
        let prober: Arc<dyn Prober> = self.prober.clone();
        let run_cfg: Arc<RunConfig> = Arc::new(cfg.clone());

        fan_out(
            addresses,
            cfg.concurrency(),
            move |address| {
                let prober = prober.clone();
                let run_cfg = run_cfg.clone();
                async move { retry::probe_with_retry(prober.as_ref(), address, &run_cfg).await }
            },
            |detail| ProbeOutcome::from(Status::ProbeError(detail)),
            self.on_progress.clone(),
        )
        .await
    }
}

/// Runs `work` for every address with at most `limit` tasks in flight.
///
/// A task that panics yields `on_fault(detail)` for its own address; siblings
/// are unaffected. Returns once every spawned task has finished.
pub(crate) async fn fan_out<T, F, Fut>(
    addresses: &[IpAddr],
    limit: usize,
    work: F,
    on_fault: fn(String) -> T,
    on_progress: Option<ProgressCallback>,
) -> HashMap<IpAddr, T>
where
    T: Send + 'static,
    F: Fn(IpAddr) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
{
    let total: usize = addresses.len();
    let permits: Arc<Semaphore> = Arc::new(Semaphore::new(limit.max(1)));
    let completed: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let mut tasks: JoinSet<(IpAddr, T)> = JoinSet::new();

    for &address in addresses {
        // Never closed, acquisition only fails after `close()`.
        let Ok(permit) = permits.clone().acquire_owned().await else {
            error!("Scheduler semaphore closed, {address} not dispatched");
            continue;
        };

        let unit = work(address);
        let completed = completed.clone();
        let on_progress = on_progress.clone();

        tasks.spawn(async move {
            let value: T = match tokio::spawn(unit).await {
                Ok(value) => value,
                Err(fault) => {
                    let detail: String = describe_fault(fault);
                    warn!("Task for {address} failed: {detail}");
                    on_fault(detail)
                }
            };
            drop(permit);

            let done: usize = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(callback) = &on_progress {
                callback(done, total);
            }

            (address, value)
        });
    }

    let mut results: HashMap<IpAddr, T> = HashMap::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((address, value)) => {
                results.insert(address, value);
            }
            Err(e) => error!("Scheduler task aborted: {e}"),
        }
    }

    results
}

fn describe_fault(fault: JoinError) -> String {
    if fault.is_cancelled() {
        return "task was cancelled".to_string();
    }

    let payload = fault.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("probe panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("probe panicked: {msg}")
    } else {
        "probe panicked".to_string()
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
