//! Parsing of the ping utility's textual output.

use std::sync::LazyLock;

use pingr_common::record::{ProbeOutcome, Status};
use regex::Regex;

static WINDOWS_AVERAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Average = (\d+)ms").expect("static regex"));

// iputils: "rtt min/avg/max/mdev = 10.0/20.5/30.0/1.0 ms"
// BSD/macOS: "round-trip min/avg/max/stddev = ..."
// busybox: "round-trip min/avg/max = 1.0/2.0/3.0 ms"
static POSIX_AVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"min/avg/max(?:/[^=]*)?\s*=\s*[\d.]+/([\d.]+)/").expect("static regex")
});

/// Phrases the various ping implementations print when the name lookup fails.
const HOST_NOT_FOUND: &[&str] = &[
    "unknown host",
    "could not find host",
    "name or service not known",
    "cannot resolve",
    "temporary failure in name resolution",
    "no address associated",
];

/// Output dialect of the platform ping utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

/// Average round-trip time in milliseconds, if the summary line is present.
pub fn parse_latency(output: &str, platform: Platform) -> Option<f64> {
    let pattern: &Regex = match platform {
        Platform::Windows => &*WINDOWS_AVERAGE,
        Platform::Posix => &*POSIX_AVERAGE,
    };

    pattern
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|avg| avg.as_str().parse::<f64>().ok())
}

/// Maps an exit status and the combined output of one invocation to an outcome.
pub fn classify(success: bool, output: &str, platform: Platform) -> ProbeOutcome {
    if success {
        return ProbeOutcome::active(parse_latency(output, platform));
    }

    let lower: String = output.to_lowercase();
    let status: Status = match true {
        _ if lower.contains("unreachable") => Status::Unreachable,
        _ if lower.contains("timed out") => Status::Timeout,
        _ if HOST_NOT_FOUND.iter().any(|phrase| lower.contains(phrase)) => Status::UnknownHost,
        _ => Status::Inactive,
    };

    ProbeOutcome::from(status)
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

    const LINUX_OK: &str = "\
PING 1.1.1.1 (1.1.1.1) 56(84) bytes of data.
64 bytes from 1.1.1.1: icmp_seq=1 ttl=57 time=11.4 ms

--- 1.1.1.1 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
rtt min/avg/max/mdev = 11.412/11.412/11.412/0.000 ms
";

    const WINDOWS_OK: &str = "\
Pinging 8.8.8.8 with 32 bytes of data:
Reply from 8.8.8.8: bytes=32 time=14ms TTL=117

Ping statistics for 8.8.8.8:
    Packets: Sent = 1, Received = 1, Lost = 0 (0% loss),
Approximate round trip times in milli-seconds:
    Minimum = 14ms, Maximum = 14ms, Average = 14ms
";

    #[test]
    fn posix_latency_is_the_average() {
        let sample = "min/avg/max/mdev = 10.0/20.5/30.0/1.0 ms";
        assert_eq!(parse_latency(sample, Platform::Posix), Some(20.5));
    }

    #[test]
    fn posix_latency_from_full_output() {
        assert_eq!(parse_latency(LINUX_OK, Platform::Posix), Some(11.412));
    }

    #[test]
    fn bsd_and_busybox_summary_lines() {
        let macos = "round-trip min/avg/max/stddev = 14.1/15.25/16.3/0.9 ms";
        let busybox = "round-trip min/avg/max = 1.0/2.0/3.0 ms";
        assert_eq!(parse_latency(macos, Platform::Posix), Some(15.25));
        assert_eq!(parse_latency(busybox, Platform::Posix), Some(2.0));
    }

    #[test]
    fn windows_latency_is_integer_average() {
        assert_eq!(parse_latency(WINDOWS_OK, Platform::Windows), Some(14.0));
    }

    #[test]
    fn latency_absent_without_summary_line() {
        assert_eq!(parse_latency("64 bytes from 1.1.1.1", Platform::Posix), None);
        assert_eq!(parse_latency(LINUX_OK, Platform::Windows), None);
    }

    #[test]
    fn success_is_active_even_without_latency() {
        let outcome = classify(true, "", Platform::Posix);
        assert!(outcome.is_active());
        assert_eq!(outcome.latency_ms(), None);

        let outcome = classify(true, LINUX_OK, Platform::Posix);
        assert_eq!(outcome.latency_ms(), Some(11.412));
    }

    #[test]
    fn failure_classification_follows_priority() {
        let unreachable = "From 10.0.0.1 icmp_seq=1 Destination Host Unreachable\nRequest timed out.";
        assert_eq!(
            classify(false, unreachable, Platform::Posix).status(),
            &Status::Unreachable
        );
        assert_eq!(
            classify(false, "Request Timed Out.", Platform::Windows).status(),
            &Status::Timeout
        );
        assert_eq!(
            classify(false, "ping: nosuch.invalid: Name or service not known", Platform::Posix)
                .status(),
            &Status::UnknownHost
        );
        assert_eq!(
            classify(false, "1 packets transmitted, 0 received, 100% packet loss", Platform::Posix)
                .status(),
            &Status::Inactive
        );
    }

    #[test]
    fn failure_never_carries_latency() {
        let outcome = classify(false, LINUX_OK, Platform::Posix);
        assert_eq!(outcome.status(), &Status::Inactive);
        assert_eq!(outcome.latency_ms(), None);
    }
}
