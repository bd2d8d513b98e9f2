//! Configuration module for the market analyst pipeline.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each concern,
//! `AppPaths` for cross-platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, PromptConfig, RotationConfig, ServiceConfig, UiConfig, BASE_URL_ENV,
};
