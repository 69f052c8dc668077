//! [`Prober`] backed by the operating system's `ping` utility.
//!
//! One child process per probe. The child is killed if the wall-clock ceiling
//! (`timeout + PROBE_MARGIN`) passes before it exits.

use std::io::ErrorKind;
use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pingr_common::config::PROBE_MARGIN;
use pingr_common::record::{ProbeOutcome, Status};
use tokio::process::Command;
use tracing::debug;

use super::output::{self, Platform};
use super::Prober;

#[derive(Debug, Clone)]
pub struct SystemProber {
    platform: Platform,
}

impl SystemProber {
    pub fn new() -> Self {
        Self {
            platform: Platform::host(),
        }
    }

    fn command(&self, address: IpAddr, timeout: Duration, packet_count: u32) -> Command {
        let count: String = packet_count.to_string();
        let mut cmd: Command = match self.platform {
            Platform::Windows => {
                let mut cmd = Command::new("ping");
                cmd.arg("-n")
                    .arg(count)
                    .arg("-w")
                    .arg(timeout.as_millis().to_string());
                cmd
            }
            Platform::Posix => posix_command(address, timeout, count),
        };

        cmd.arg(address.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for SystemProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for SystemProber {
    async fn probe(&self, address: IpAddr, timeout: Duration, packet_count: u32) -> ProbeOutcome {
        let ceiling: Duration = timeout + PROBE_MARGIN;
        let mut cmd: Command = self.command(address, timeout, packet_count);

        match tokio::time::timeout(ceiling, cmd.output()).await {
            Err(_elapsed) => {
                debug!("ping {address} exceeded {}ms ceiling", ceiling.as_millis());
                ProbeOutcome::from(Status::Timeout)
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => ProbeOutcome::from(
                Status::ProbeError("'ping' utility not found on this system".to_string()),
            ),
            Ok(Err(e)) => ProbeOutcome::from(Status::ProbeError(format!("failed to run ping: {e}"))),
            Ok(Ok(out)) => {
                let mut text: String = String::from_utf8_lossy(&out.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&out.stderr));
                let outcome = output::classify(out.status.success(), &text, self.platform);
                debug!("ping {address} -> {} ({})", outcome.status(), out.status);
                outcome
            }
        }
    }
}

#[cfg(target_os = "macos")]
fn posix_command(address: IpAddr, timeout: Duration, count: String) -> Command {
    // macOS ships a separate ping6 without a reply timeout flag; the ceiling covers it.
    if address.is_ipv6() {
        let mut cmd = Command::new("ping6");
        cmd.arg("-c").arg(count);
        return cmd;
    }
    let mut cmd = Command::new("ping");
    cmd.arg("-c")
        .arg(count)
        .arg("-W")
        .arg(timeout.as_millis().to_string());
    cmd
}

#[cfg(not(target_os = "macos"))]
fn posix_command(_address: IpAddr, timeout: Duration, count: String) -> Command {
    let secs: u64 = timeout.as_secs().max(1);
    let mut cmd = Command::new("ping");
    cmd.arg("-c").arg(count).arg("-W").arg(secs.to_string());
    cmd
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
