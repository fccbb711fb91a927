//! Threshold-based verdict over the moderation service's categories.

use std::sync::Arc;

use crate::config::ModerationConfig;
use crate::error::AnalysisError;
use crate::moderation::service::ModerationService;
use crate::verdict::{ModerationCategory, ModerationVerdict};

/// `true` iff some category is named `category` and its confidence is
/// strictly above `threshold`.  Every other category is informational.
///
/// ```
/// use moderation_compare::moderation::is_content_toxic;
/// use moderation_compare::verdict::ModerationCategory;
///
/// let cats = [ModerationCategory::new("Toxic", 0.21)];
/// assert!(is_content_toxic(&cats, "Toxic", 0.20));
/// assert!(!is_content_toxic(&cats, "Toxic", 0.21));
/// ```
pub fn is_content_toxic(categories: &[ModerationCategory], category: &str, threshold: f32) -> bool {
    categories
        .iter()
        .any(|c| c.name == category && c.confidence > threshold)
}

/// Sends text to a [`ModerationService`] and turns its categories into a
/// [`ModerationVerdict`].
pub struct ModerationPipeline {
    service: Arc<dyn ModerationService>,
    toxic_category: String,
    threshold: f32,
}

impl ModerationPipeline {
    pub fn new(
        service: Arc<dyn ModerationService>,
        toxic_category: impl Into<String>,
        threshold: f32,
    ) -> Self {
        Self {
            service,
            toxic_category: toxic_category.into(),
            threshold,
        }
    }

    /// Pipeline over `service` using the category and threshold in `config`.
    pub fn from_config(service: Arc<dyn ModerationService>, config: &ModerationConfig) -> Self {
        Self::new(service, config.toxic_category.clone(), config.toxic_threshold)
    }

    /// One service call, no retry.  An empty category list is a non-toxic
    /// verdict, not an error.
    pub async fn moderate(&self, text: &str) -> Result<ModerationVerdict, AnalysisError> {
        log::debug!("moderation: scoring {} chars", text.chars().count());

        let categories = self.service.moderate_text(text).await.map_err(|e| {
            log::warn!("moderation: service call failed: {e}");
            e
        })?;

        let toxic = is_content_toxic(&categories, &self.toxic_category, self.threshold);
        log::debug!(
            "moderation: {} categories, toxic = {toxic}",
            categories.len()
        );

        Ok(ModerationVerdict {
            toxic,
            reason: None,
            categories,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
