pub mod anniversary;
pub mod config;
pub mod countdown;
pub mod play;
pub mod quiz;

use chrono::NaiveDateTime;
use lovecard_core::timer::{local_now, parse_instant};

/// `--at` override, or the local wall clock.
pub fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match at {
        Some(raw) => parse_instant(raw)
            .ok_or_else(|| format!("invalid instant for --at: '{raw}'").into()),
        None => Ok(local_now()),
    }
}

/// Single-threaded runtime: every callback runs to completion on one thread.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
