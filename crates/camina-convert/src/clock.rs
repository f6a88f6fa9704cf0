//! Timestamps and timing.

use chrono::Utc;
use std::time::Instant;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Current UTC date and time rendered with `time_format` (strftime syntax,
/// [`DEFAULT_TIME_FORMAT`] when `None`), optionally prefixed.
pub fn how_soon_is_now(prefix: Option<&str>, time_format: Option<&str>) -> String {
    let format = time_format.unwrap_or(DEFAULT_TIME_FORMAT);
    let stamp = Utc::now().format(format).to_string();
    match prefix {
        Some(prefix) => format!("{prefix}{stamp}"),
        None => stamp,
    }
}

/// Runs `process`, reporting its wall-clock duration as `h:mm:ss` through
/// `tracing`, and returns its result.
pub fn timer<R>(name: &str, process: impl FnOnce() -> R) -> R {
    let started = Instant::now();
    let result = process();
    let elapsed = started.elapsed().as_secs();
    let (hours, rest) = (elapsed / 3600, elapsed % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    tracing::info!(
        process = name,
        elapsed_secs = elapsed,
        "{name} completed in {hours}:{minutes:02}:{seconds:02}"
    );
    result
}
