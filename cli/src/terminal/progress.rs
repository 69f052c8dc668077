use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pingr_core::scheduler::ProgressCallback;

/// Bar of the sweep that is currently running, if any.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

const TEMPLATE: &str = "{spinner:.blue} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

fn current() -> Option<ProgressBar> {
    ACTIVE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Shows a bar for `total` probes and returns the callback that advances it.
///
/// Hidden when `quiet`; the callback is still valid and simply does nothing
/// visible.
pub fn start(total: usize, quiet: bool) -> ProgressCallback {
    let pb: ProgressBar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };

    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        pb.set_style(style.progress_chars("█▓░").tick_strings(&[
            "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
        ]));
    }
    pb.set_message("pinging");
    pb.enable_steady_tick(Duration::from_millis(100));

    *ACTIVE.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb.clone());

    // Callbacks may land out of order, so count rather than set the position.
    Arc::new(move |_done: usize, _total: usize| pb.inc(1))
}

pub fn finish() {
    if let Some(pb) = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner).take() {
        pb.finish_and_clear();
    }
}

/// Log sink that keeps a visible progress bar intact.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match current() {
            Some(pb) if !pb.is_hidden() => pb.suspend(|| io::stdout().write_all(buf))?,
            _ => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
