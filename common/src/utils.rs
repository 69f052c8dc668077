use chrono::{DateTime, TimeZone};

/// Clamps `value` between optional bounds. A missing bound leaves that side open.
pub fn clamp<T: Ord>(value: T, minimum: Option<T>, maximum: Option<T>) -> T {
    let value = match minimum {
        Some(min) => value.max(min),
        None => value,
    };
    match maximum {
        Some(max) => value.min(max),
        None => value,
    }
}

/// Filesystem safe timestamp, e.g. `20261018_142501`.
pub fn timestamp_tag<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y%m%d_%H%M%S").to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
