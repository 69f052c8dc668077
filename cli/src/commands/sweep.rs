use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use pingr_common::config::{Config, RunConfig};
use pingr_common::network::{interface, subnet};
use pingr_common::record::ProbeRecord;
use pingr_core::sweep::SweepService;
use tracing::{error, info};

use crate::commands::{SweepArgs, sweep_service};
use crate::io::{input, output};
use crate::terminal::{print, progress, report};

enum Source {
    File(PathBuf),
    Subnet(Option<IpAddr>),
}

impl Source {
    fn from_args(args: &SweepArgs) -> Self {
        if args.discover || args.subnet_of.is_some() {
            Source::Subnet(args.subnet_of)
        } else {
            let path: PathBuf = args
                .input
                .clone()
                .unwrap_or_else(|| PathBuf::from(input::DEFAULT_INPUT));
            Source::File(path)
        }
    }

    /// Reread on every pass so edits between interval runs are picked up.
    fn targets(&self) -> anyhow::Result<Vec<IpAddr>> {
        match self {
            Source::File(path) => Ok(input::load_targets(path)?.addresses),
            Source::Subnet(base) => {
                let base: IpAddr = match base {
                    Some(ip) => *ip,
                    None => IpAddr::V4(interface::local_ipv4()?),
                };
                let hosts: Vec<IpAddr> = subnet::hosts_in_slash24(base)?;
                info!("Discovered {} addresses in the /24 of {base}", hosts.len());
                Ok(hosts)
            }
        }
    }
}

pub async fn sweep(args: &SweepArgs, cfg: &Config) -> anyhow::Result<()> {
    let run_cfg: RunConfig = args.tuning.run_config()?;
    let source: Source = Source::from_args(args);

    if let Source::File(path) = &source {
        ensure_input(path)?;
    }

    let mut pass: usize = 0;
    loop {
        pass += 1;
        match run_pass(&source, &run_cfg, args, cfg).await {
            Ok(()) => {}
            Err(e) if keep_going(pass, args.interval) => {
                error!("Run {pass} failed, waiting for the next one: {e:#}");
            }
            Err(e) => return Err(e),
        }

        let Some(minutes) = args.interval else {
            break;
        };
        info!("Sleeping for {minutes} minute(s) before next run...");
        tokio::time::sleep(Duration::from_secs(minutes * 60)).await;
    }

    Ok(())
}

async fn run_pass(
    source: &Source,
    run_cfg: &RunConfig,
    args: &SweepArgs,
    cfg: &Config,
) -> anyhow::Result<()> {
    let targets: Vec<IpAddr> = source.targets()?;
    let records: Vec<ProbeRecord> = sweep_once(&targets, run_cfg, cfg).await?;
    output::save_results(&records, &args.output, &args.formats);
    Ok(())
}

/// The first pass fails the command; later interval passes only log.
fn keep_going(pass: usize, interval: Option<u64>) -> bool {
    interval.is_some() && pass > 1
}

fn ensure_input(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    input::create_sample(path)
        .with_context(|| format!("{} does not exist and could not be created", path.display()))
}

async fn sweep_once(
    targets: &[IpAddr],
    run_cfg: &RunConfig,
    cfg: &Config,
) -> anyhow::Result<Vec<ProbeRecord>> {
    print::header("sweeping", cfg.quiet);

    let service: SweepService =
        sweep_service(cfg.no_dns).with_progress(progress::start(targets.len(), cfg.quiet > 0));
    let start_time: Instant = Instant::now();
    let result = service.run(targets, run_cfg).await;
    progress::finish();

    let records: Vec<ProbeRecord> = result?;
    report::sweep_ends(&records, start_time.elapsed(), cfg);
    Ok(records)
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
    use std::fs;

    #[test]
    fn only_later_interval_passes_survive_errors() {
        assert!(!keep_going(1, None));
        assert!(!keep_going(1, Some(5)));
        assert!(keep_going(2, Some(5)));
        assert!(keep_going(40, Some(1)));
    }

    #[test]
    fn file_source_is_reread_every_pass() {
        let path = std::env::temp_dir().join(format!("pingr-pass-{}.txt", std::process::id()));
        fs::write(&path, "192.0.2.10\n").unwrap();
        let source = Source::File(path.clone());
        assert_eq!(source.targets().unwrap().len(), 1);

        fs::write(&path, "# nothing valid\nnot-an-ip\n").unwrap();
        assert!(source.targets().unwrap().is_empty());

        fs::remove_file(&path).unwrap();
        assert!(source.targets().is_err());

        fs::write(&path, "192.0.2.11\n192.0.2.12\n").unwrap();
        assert_eq!(source.targets().unwrap().len(), 2);
        fs::remove_file(&path).ok();
    }
}
