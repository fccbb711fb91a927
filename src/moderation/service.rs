//! `ModerationService` trait and the Cloud Natural Language implementation.
//!
//! [`LanguageApiClient`] calls `POST {base_url}/v1/documents:moderateText`.
//! All connection details come from [`ModerationConfig`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ModerationConfig;
use crate::error::AnalysisError;
use crate::verdict::ModerationCategory;

// ---------------------------------------------------------------------------
// ModerationService trait
// ---------------------------------------------------------------------------

/// Something that scores text against moderation categories.
///
/// Implementors must be `Send + Sync` so they can be shared behind
/// `Arc<dyn ModerationService>`.
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Score `text`, returning categories in the service's order.
    async fn moderate_text(&self, text: &str) -> Result<Vec<ModerationCategory>, AnalysisError>;
}

// ---------------------------------------------------------------------------
// LanguageApiClient
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModerateTextResponse {
    #[serde(default)]
    moderation_categories: Vec<ModerationCategory>,
}

/// Calls the Cloud Natural Language `documents:moderateText` method.
///
/// The API key (query parameter) and access token (bearer header) are each
/// attached only when configured and non-empty.
pub struct LanguageApiClient {
    client: reqwest::Client,
    config: ModerationConfig,
}

impl LanguageApiClient {
    /// Build a client from config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`.  If the builder fails a warning is logged and a
    /// default client (no timeout) is used instead.
    pub fn from_config(config: &ModerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("moderation: HTTP client build failed ({e}); using defaults without timeout");
                reqwest::Client::new()
            });

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/documents:moderateText",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ModerationService for LanguageApiClient {
    async fn moderate_text(&self, text: &str) -> Result<Vec<ModerationCategory>, AnalysisError> {
        let body = serde_json::json!({
            "document": {
                "type":    "PLAIN_TEXT",
                "content": text
            }
        });

        let mut req = self.client.post(self.endpoint()).json(&body);

        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            req = req.query(&[("key", key)]);
        }
        if let Some(token) = self.config.access_token.as_deref().filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::from_status(status, &body));
        }

        let parsed: ModerateTextResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        Ok(parsed.moderation_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let config = ModerationConfig {
            base_url: "http://localhost:8080/".into(),
            ..ModerationConfig::default()
        };
        let client = LanguageApiClient::from_config(&config);
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1/documents:moderateText"
        );
    }

    #[test]
    fn response_without_categories_is_empty() {
        let parsed: ModerateTextResponse =
            serde_json::from_str(r#"{"languageCode": "en"}"#).expect("parse");
        assert!(parsed.moderation_categories.is_empty());
    }

    #[test]
    fn response_keeps_category_order_and_ignores_extra_fields() {
        let parsed: ModerateTextResponse = serde_json::from_str(
            r#"{"moderationCategories": [
                {"name": "Toxic", "confidence": 0.85, "severity": 0.3},
                {"name": "Insult", "confidence": 0.6}
            ]}"#,
        )
        .expect("parse");

        assert_eq!(
            parsed.moderation_categories,
            vec![
                ModerationCategory::new("Toxic", 0.85),
                ModerationCategory::new("Insult", 0.6),
            ]
        );
    }

    #[test]
    fn client_is_object_safe() {
        let client: Box<dyn ModerationService> =
            Box::new(LanguageApiClient::from_config(&ModerationConfig::default()));
        drop(client);
    }
}
