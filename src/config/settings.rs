//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable holding the Natural Language API key.
pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
/// Environment variable holding an OAuth bearer token used by both backends.
pub const ENV_ACCESS_TOKEN: &str = "GOOGLE_CLOUD_ACCESS_TOKEN";
/// Environment variable holding the Vertex AI project id.
pub const ENV_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";

// ---------------------------------------------------------------------------
// ModerationConfig
// ---------------------------------------------------------------------------

/// Settings for the managed moderation service (Cloud Natural Language
/// `documents:moderateText`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Base URL of the API, without the `/v1/...` path.
    pub base_url: String,
    /// API key sent as the `key` query parameter, if set.
    pub api_key: Option<String>,
    /// OAuth access token sent as `Authorization: Bearer …`, if set.
    pub access_token: Option<String>,
    /// Name of the category that decides the verdict.
    pub toxic_category: String,
    /// Confidence that `toxic_category` must strictly exceed to be flagged.
    pub toxic_threshold: f32,
    /// Maximum seconds to wait for a response.
    pub timeout_secs: u64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://language.googleapis.com".into(),
            api_key: None,
            access_token: None,
            toxic_category: "Toxic".into(),
            toxic_threshold: 0.20,
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Settings for the text-generation backend (Vertex AI `:predict`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Override for the API host.  `None` derives
    /// `https://{location}-aiplatform.googleapis.com`.
    pub base_url: Option<String>,
    /// Google Cloud project that owns the model deployment.
    pub project_id: String,
    /// Vertex AI region.
    pub location: String,
    /// Publisher model id (e.g. `"text-bison"`).
    pub model: String,
    /// OAuth access token sent as `Authorization: Bearer …`.
    pub access_token: Option<String>,
    pub candidate_count: u32,
    pub max_output_tokens: u32,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    /// Maximum seconds to wait for a response.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project_id: String::new(),
            location: "us-central1".into(),
            model: "text-bison".into(),
            access_token: None,
            candidate_count: 1,
            max_output_tokens: 1024,
            temperature: 0.1,
            top_p: 0.8,
            top_k: 40,
            timeout_secs: 60,
        }
    }
}

impl GenerationConfig {
    /// The API host to use, honouring `base_url` when set.
    pub fn endpoint_base(&self) -> String {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("https://{}-aiplatform.googleapis.com", self.location),
        }
    }
}

// ---------------------------------------------------------------------------
// PricingConfig
// ---------------------------------------------------------------------------

/// A published price: `rate_per_unit` USD for every `unit_size` characters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRate {
    pub rate_per_unit: f64,
    pub unit_size: f64,
}

/// Per-backend pricing used by the cost estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Moderation API: $0.0005 per 100 characters.
    pub moderation: CostRate,
    /// Text generation: $0.0005 per 1000 characters.
    pub generation: CostRate,
    /// Extra line shown under the moderation cost.
    pub moderation_free_tier_note: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            moderation: CostRate {
                rate_per_unit: 0.0005,
                unit_size: 100.0,
            },
            generation: CostRate {
                rate_per_unit: 0.0005,
                unit_size: 1000.0,
            },
            moderation_free_tier_note: "First 50K requests per month are free".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// egui window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner window size in logical pixels.
    pub window_size: (f32, f32),
    /// Decimal places used when rendering cost estimates.
    pub cost_precision: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (1100.0, 760.0),
            cost_precision: 10,
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
/// use moderation_compare::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let mut config = AppConfig::load().unwrap();
/// config.apply_env_overrides();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Managed moderation service settings.
    pub moderation: ModerationConfig,
    /// Generation backend settings.
    pub generation: GenerationConfig,
    /// Cost estimator rates.
    pub pricing: PricingConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
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

    /// Overlay credentials and project id from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Overlay credentials and project id using `lookup` to read variables.
    ///
    /// Empty values are ignored so an exported-but-blank variable never wipes
    /// a value from `settings.toml`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.moderation.api_key = Some(key);
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.moderation.access_token = Some(token.clone());
            self.generation.access_token = Some(token);
        }
        if let Some(project) = get(ENV_PROJECT) {
            self.generation.project_id = project;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
