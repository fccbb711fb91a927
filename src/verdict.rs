//! Verdict types produced by both pipelines.

use serde::{Deserialize, Serialize};

/// One category scored by the moderation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationCategory {
    pub name: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl ModerationCategory {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Toxic / non-toxic decision plus whatever detail the backend supplied.
///
/// Lives for a single render pass; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModerationVerdict {
    pub toxic: bool,
    /// Explanation, when the backend gives one.
    pub reason: Option<String>,
    /// Categories in the order the backend returned them (possibly empty).
    pub categories: Vec<ModerationCategory>,
}

impl ModerationVerdict {
    /// Short label for the pass/fail banner.
    pub fn label(&self) -> &'static str {
        if self.toxic {
            "Content is not safe"
        } else {
            "Content is safe"
        }
    }
}
