//! # Probing engine
//!
//! Fans reachability checks out over a bounded pool of tasks and folds the
//! results back into one record per address.
//!
//! * [`prober`]: one ping invocation for one address, plus output parsing.
//! * [`retry`]: sequential retries until the first `Active` outcome.
//! * [`resolver`]: best-effort reverse lookups.
//! * [`scheduler`]: bounded fan-out with per-task fault isolation.
//! * [`aggregator`]: merges outcomes and hostnames in input order.
//! * [`sweep`]: one full pass of the pipeline.

pub mod aggregator;
pub mod prober;
pub mod resolver;
pub mod retry;
pub mod scheduler;
pub mod sweep;
