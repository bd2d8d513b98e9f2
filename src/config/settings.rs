//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable that overrides [`ServiceConfig::base_url`].
pub const BASE_URL_ENV: &str = "FASTAPI_HOST";

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Connection settings for the three stage services.
///
/// All three endpoints hang off a single base address; the paths themselves
/// are fixed (see [`crate::client::Stage::path`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout for the transcribe and market-data stages.
    ///
    /// `None` leaves the transport default in place.
    pub stage_timeout_secs: Option<u64>,
    /// Deadline for the answer stage.
    ///
    /// `None` (the default) waits for as long as the service takes; the
    /// headline rotation covers the wait.
    pub answer_timeout_secs: Option<u64>,
}

impl ServiceConfig {
    pub fn stage_timeout(&self) -> Option<Duration> {
        self.stage_timeout_secs.map(Duration::from_secs)
    }

    pub fn answer_timeout(&self) -> Option<Duration> {
        self.answer_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            stage_timeout_secs: None,
            answer_timeout_secs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// RotationConfig
// ---------------------------------------------------------------------------

/// Headline carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Seconds each headline stays on screen.
    pub interval_secs: u64,
}

impl RotationConfig {
    /// The rotation interval, clamped to at least one millisecond so a zero
    /// value cannot turn the carousel into a busy loop.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs).max(Duration::from_millis(1))
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { interval_secs: 7 }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Cosmetic presentation switches.
///
/// These cover the differences between the front-end variants; none of them
/// change how the pipeline behaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Name shown above the final answer.
    pub assistant_name: String,
    /// Show the raw market-data payload once it arrives.
    pub show_market_data: bool,
    /// Render answer audio with `autoplay`.
    pub autoplay_audio: bool,
    /// Render headlines and answer audio as HTML snippets instead of text.
    pub render_html: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            assistant_name: "V.E.R.O.N.I.C.A".into(),
            show_market_data: true,
            autoplay_audio: true,
            render_html: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PromptConfig
// ---------------------------------------------------------------------------

/// Location of the bundled sample prompt recordings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub prompts_dir: PathBuf,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            prompts_dir: PathBuf::from("prompts"),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use market_analyst::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Stage service connection settings.
    pub service: ServiceConfig,
    /// Headline carousel settings.
    pub rotation: RotationConfig,
    /// Presentation settings.
    pub ui: UiConfig,
    /// Sample prompt location.
    pub prompts: PromptConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet so
    /// callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply the `FASTAPI_HOST` override read from the process environment.
    ///
    /// Called once at start-up after `.env` has been loaded.
    pub fn apply_env(&mut self) {
        self.apply_base_url(std::env::var(BASE_URL_ENV).ok());
    }

    /// Replace the base URL when `value` is a non-blank string.
    ///
    /// Trailing slashes are trimmed so the fixed endpoint paths can be
    /// appended directly.
    pub fn apply_base_url(&mut self, value: Option<String>) {
        if let Some(url) = value {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                self.service.base_url = url.to_string();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
