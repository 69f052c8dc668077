use std::net::IpAddr;

use pingr_common::config::{Config, RunConfig};
use pingr_common::network::address;
use pingr_common::record::{ProbeOutcome, UNRESOLVABLE};
use pingr_core::sweep::SweepService;

use crate::commands::{CheckArgs, sweep_service};
use crate::terminal::{print, report};

pub async fn check(args: &CheckArgs, cfg: &Config) -> anyhow::Result<()> {
    let run_cfg: RunConfig = args.tuning.run_config()?;
    let service: SweepService = sweep_service(cfg.no_dns);
    let raw: &str = args.address.trim();

    print::header("single check", cfg.quiet);

    let (outcome, hostname) = match address::parse(raw) {
        Ok(ip) => tokio::join!(
            service.check_literal(raw, &run_cfg),
            hostname(&service, ip)
        ),
        Err(_) => (
            service.check_literal(raw, &run_cfg).await,
            UNRESOLVABLE.to_string(),
        ),
    };

    print_outcome(raw, &outcome, &hostname);
    Ok(())
}

async fn hostname(service: &SweepService, ip: IpAddr) -> String {
    service
        .hostname_of(ip)
        .await
        .unwrap_or_else(|| UNRESOLVABLE.to_string())
}

fn print_outcome(raw: &str, outcome: &ProbeOutcome, hostname: &str) {
    print::tree_head(0, raw);
    print::as_tree_one_level(vec![
        ("Status".to_string(), report::status_value(outcome.status())),
        ("Latency".to_string(), report::latency_value(outcome.latency_ms())),
        ("Host".to_string(), report::hostname_value(hostname)),
    ]);
}
