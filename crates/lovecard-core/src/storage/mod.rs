mod config;

pub use config::{
    AnniversaryConfig, AudioConfig, Config, CountdownConfig, GalleryConfig, QuizConfig,
    RevealConfig, ValentineConfig,
};

use std::path::PathBuf;

/// Returns `~/.config/lovecard[-dev]/` based on LOVECARD_ENV.
///
/// Set LOVECARD_ENV=dev to use the development config directory. The
/// directory is not created; only saving does that.
pub fn data_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LOVECARD_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("lovecard-dev")
    } else {
        base_dir.join("lovecard")
    }
}
