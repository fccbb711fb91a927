//! Prompted-LLM moderation: prompt → generate → extract JSON → verdict.

use std::sync::Arc;

use crate::error::AnalysisError;
use crate::llm::extract::parse_verdict;
use crate::llm::generator::{SamplingParams, TextGenerator};
use crate::llm::prompt::PromptBuilder;
use crate::verdict::ModerationVerdict;

/// Outcome of the generative pipeline: the verdict plus the parsed JSON the
/// model returned, which the UI shows as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub verdict: ModerationVerdict,
    pub payload: serde_json::Value,
}

/// Classifies text by prompting a [`TextGenerator`].
pub struct GenerativePipeline {
    generator: Arc<dyn TextGenerator>,
    prompt_builder: PromptBuilder,
    params: SamplingParams,
}

impl GenerativePipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, params: SamplingParams) -> Self {
        Self {
            generator,
            prompt_builder: PromptBuilder::new(),
            params,
        }
    }

    /// One generation call, no retry.
    ///
    /// `toxic` defaults to `false` and `reason` to `""` when the model omits
    /// them; the verdict never carries categories.
    pub async fn moderate_via_generation(
        &self,
        text: &str,
    ) -> Result<GenerationReport, AnalysisError> {
        log::debug!("generation: classifying {} chars", text.chars().count());

        let prompt = self.prompt_builder.build(text);
        let reply = self
            .generator
            .generate(&prompt, &self.params)
            .await
            .map_err(|e| {
                log::warn!("generation: backend call failed: {e}");
                e
            })?;

        let (generated, payload) = parse_verdict(&reply).map_err(|e| {
            log::warn!("generation: could not read verdict from reply ({} chars): {e}", reply.len());
            e
        })?;

        log::debug!("generation: toxic = {}", generated.toxic);

        Ok(GenerationReport {
            verdict: ModerationVerdict {
                toxic: generated.toxic,
                reason: Some(generated.reason),
                categories: Vec::new(),
            },
            payload,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
