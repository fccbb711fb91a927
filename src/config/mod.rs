//! Configuration module for the moderation comparison app.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each backend,
//! pricing and the window, `AppPaths` for cross-platform directories, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, CostRate, GenerationConfig, ModerationConfig, PricingConfig, UiConfig,
};
