use std::sync::Once;

use colored::*;
use tracing::debug;

use crate::terminal::{colors, print};

static SHOWN: Once = Once::new();

const NOTICE: &[&str] = &[
    "This tool sends ICMP echo requests through the system ping utility",
    "and may be flagged by network monitoring.",
    "",
    "Only probe networks and hosts you are authorised to test.",
];

/// Prints the usage notice, at most once per process.
pub fn show_once(no_disclaimer: bool, q_level: u8) {
    if no_disclaimer || q_level > 0 {
        return;
    }

    SHOWN.call_once(|| {
        debug!("Usage notice displayed");
        print::header("network use notice", q_level);
        for line in NOTICE {
            print::print(&format!("  {}", line.color(colors::ACCENT)));
        }
        print::fat_separator();
    });
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
