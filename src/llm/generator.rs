//! Core `TextGenerator` trait and the Vertex AI implementation.
//!
//! [`VertexGenerator`] calls the publisher-model `:predict` method of a
//! text model such as `text-bison`.  All connection details come from
//! [`GenerationConfig`]; nothing is hardcoded except the URL layout.

use async_trait::async_trait;

use crate::config::GenerationConfig;
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// SamplingParams
// ---------------------------------------------------------------------------

/// Fixed generation parameters sent with every prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub candidate_count: u32,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

impl SamplingParams {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            candidate_count: config.candidate_count,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
        }
    }

    /// The `parameters` object of a `:predict` request.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "candidateCount":  self.candidate_count,
            "maxOutputTokens": self.max_output_tokens,
            "temperature":     self.temperature,
            "topP":            self.top_p,
            "topK":            self.top_k
        })
    }
}

// ---------------------------------------------------------------------------
// TextGenerator trait
// ---------------------------------------------------------------------------

/// Something that produces free-form text from a prompt.
///
/// Implementors must be `Send + Sync` so they can be shared behind
/// `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<String, AnalysisError>;
}

// ---------------------------------------------------------------------------
// VertexGenerator
// ---------------------------------------------------------------------------

/// Calls `POST {base}/v1/projects/{p}/locations/{l}/publishers/google/models/{m}:predict`.
///
/// The `Authorization: Bearer …` header is attached only when
/// `config.access_token` is set and non-empty.
pub struct VertexGenerator {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl VertexGenerator {
    /// Build a generator from config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`.  If the builder fails a warning is logged and a
    /// default client (no timeout) is used instead.
    pub fn from_config(config: &GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("generation: HTTP client build failed ({e}); using defaults without timeout");
                reqwest::Client::new()
            });

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            self.config.endpoint_base(),
            self.config.project_id,
            self.config.location,
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for VertexGenerator {
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> Result<String, AnalysisError> {
        if self.config.project_id.is_empty() {
            return Err(AnalysisError::Backend(
                "no generation project configured".into(),
            ));
        }

        let body = serde_json::json!({
            "instances":  [ { "prompt": prompt } ],
            "parameters": params.to_json()
        });

        let mut req = self.client.post(self.endpoint()).json(&body);

        let token = self.config.access_token.as_deref().unwrap_or("");
        if !token.is_empty() {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::from_status(status, &body));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        json["predictions"][0]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AnalysisError::MalformedResponse("reply has no prediction content".into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
