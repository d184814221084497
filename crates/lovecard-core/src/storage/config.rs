//! TOML-based card configuration.
//!
//! Every section defaults to the built-in card content, so an absent file
//! (or an absent section) reproduces the hardcoded card exactly:
//! - Countdown target instant and expiry message
//! - Anniversary start instant
//! - Panel order and exit animation length
//! - Reasons, affirmations and the credits caption
//! - Quiz questions
//! - Valentine prompts, illustration frames and acceptance message
//! - Audio tracks
//!
//! Configuration is stored at `~/.config/lovecard/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::audio::{AudioCues, DEFAULT_RETRY_DELAY_MS};
use crate::content;
use crate::error::{ConfigError, Result, ValidationError};
use crate::gallery::ReasonItem;
use crate::quiz::QuizQuestion;
use crate::reveal::DEFAULT_EXIT_ANIMATION_MS;
use crate::timer::parse_instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_expired_message")]
    pub expired_message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnniversaryConfig {
    /// Falls back to "now" when absent or unparsable.
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_panels")]
    pub panels: Vec<String>,
    #[serde(default = "default_exit_animation_ms")]
    pub exit_animation_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "content::reasons")]
    pub reasons: Vec<ReasonItem>,
    #[serde(default = "content::affirmations")]
    pub affirmations: Vec<String>,
    #[serde(default = "default_caption")]
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "content::quiz_questions")]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValentineConfig {
    #[serde(default = "default_initial_prompt")]
    pub initial_prompt: String,
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,
    #[serde(default = "default_frames")]
    pub frames: Vec<String>,
    #[serde(default = "default_accepted_message")]
    pub accepted_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 0..=100
    #[serde(default = "default_volume")]
    pub volume: u32,
    #[serde(default = "default_background")]
    pub background: Option<String>,
    #[serde(default = "default_decline_effect")]
    pub decline_effect: Option<String>,
    #[serde(default = "default_accept_effect")]
    pub accept_effect: Option<String>,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Card configuration.
///
/// Serialized to/from TOML at `~/.config/lovecard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub anniversary: AnniversaryConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub valentine: ValentineConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

// Default functions
fn default_target() -> String {
    content::TARGET_INSTANT.into()
}
fn default_expired_message() -> String {
    content::EXPIRED_MESSAGE.into()
}
fn default_panels() -> Vec<String> {
    content::PANELS.iter().map(|p| p.to_string()).collect()
}
fn default_exit_animation_ms() -> u64 {
    DEFAULT_EXIT_ANIMATION_MS
}
fn default_caption() -> String {
    content::CREDITS_CAPTION.into()
}
fn default_initial_prompt() -> String {
    content::INITIAL_PROMPT.into()
}
fn default_phrases() -> Vec<String> {
    content::ESCALATION_PHRASES.iter().map(|p| p.to_string()).collect()
}
fn default_frames() -> Vec<String> {
    content::ESCALATION_FRAMES.iter().map(|p| p.to_string()).collect()
}
fn default_accepted_message() -> String {
    content::ACCEPTED_MESSAGE.into()
}
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    60
}
fn default_background() -> Option<String> {
    Some(content::BACKGROUND_TRACK.into())
}
fn default_decline_effect() -> Option<String> {
    Some(content::DECLINE_EFFECT.into())
}
fn default_accept_effect() -> Option<String> {
    Some(content::ACCEPT_EFFECT.into())
}
fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            expired_message: default_expired_message(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            panels: default_panels(),
            exit_animation_ms: default_exit_animation_ms(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            reasons: content::reasons(),
            affirmations: content::affirmations(),
            caption: default_caption(),
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: content::quiz_questions(),
        }
    }
}

impl Default for ValentineConfig {
    fn default() -> Self {
        Self {
            initial_prompt: default_initial_prompt(),
            phrases: default_phrases(),
            frames: default_frames(),
            accepted_message: default_accepted_message(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            background: default_background(),
            decline_effect: default_decline_effect(),
            accept_effect: default_accept_effect(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl AudioConfig {
    pub fn cues(&self) -> AudioCues {
        AudioCues {
            enabled: self.enabled,
            volume: self.volume.min(100) as f32 / 100.0,
            background: self.background.clone(),
            decline_effect: self.decline_effect.clone(),
            accept_effect: self.accept_effect.clone(),
            retry_delay_ms: self.retry_delay_ms,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".into(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Unset optional strings serialize as null.
                    serde_json::Value::Null if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> PathBuf {
        data_dir().join("config.toml")
    }

    /// Load from the default location, or defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, or defaults when it does not exist. Never writes.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config fails validation. `self` is left unchanged
    /// on error.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Check the invariants the card relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if parse_instant(&self.countdown.target).is_none() {
            return Err(ValidationError::InvalidInstant {
                field: "countdown.target".into(),
                value: self.countdown.target.clone(),
            });
        }
        if let Some(start) = &self.anniversary.start {
            if parse_instant(start).is_none() {
                return Err(ValidationError::InvalidInstant {
                    field: "anniversary.start".into(),
                    value: start.clone(),
                });
            }
        }
        if self.reveal.panels.is_empty() {
            return Err(ValidationError::EmptyCollection("reveal.panels".into()));
        }
        if self.gallery.reasons.is_empty() {
            return Err(ValidationError::EmptyCollection("gallery.reasons".into()));
        }
        if self.quiz.questions.is_empty() {
            return Err(ValidationError::EmptyCollection("quiz.questions".into()));
        }
        for (field, list) in [
            ("valentine.phrases", &self.valentine.phrases),
            ("valentine.frames", &self.valentine.frames),
        ] {
            if list.len() != 4 {
                return Err(ValidationError::WrongLength {
                    field: field.into(),
                    expected: 4,
                    actual: list.len(),
                });
            }
        }
        Ok(())
    }
}
