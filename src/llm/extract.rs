//! JSON verdict extraction from free-form model output.
//!
//! The model is asked for JSON but often wraps it in prose.  Extraction takes
//! everything from the first `{` to the last `}` inclusive.  Braces inside the
//! surrounding prose therefore break extraction; that is accepted behaviour
//! and covered by tests below.

use serde::{Deserialize, Deserializer};

use crate::error::AnalysisError;

/// Fields read from the model's JSON.  Anything else is ignored.
///
/// A field that is absent or `null` takes its default.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GeneratedVerdict {
    #[serde(default, deserialize_with = "null_as_default")]
    pub toxic: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Slice from the first `{` to the last `}` of `reply`.
///
/// Fails with [`AnalysisError::MalformedResponse`] when either brace is
/// missing or the last `}` comes before the first `{`.
///
/// ```
/// use moderation_compare::llm::extract_json_block;
///
/// let block = extract_json_block(r#"Sure: {"toxic": false} done"#).unwrap();
/// assert_eq!(block, r#"{"toxic": false}"#);
/// ```
pub fn extract_json_block(reply: &str) -> Result<&str, AnalysisError> {
    let start = reply
        .find('{')
        .ok_or_else(|| AnalysisError::MalformedResponse("no '{' in model reply".into()))?;
    let end = reply
        .rfind('}')
        .ok_or_else(|| AnalysisError::MalformedResponse("no '}' in model reply".into()))?;

    if end < start {
        return Err(AnalysisError::MalformedResponse(
            "last '}' precedes first '{' in model reply".into(),
        ));
    }

    Ok(&reply[start..=end])
}

/// Extract and parse the JSON block of `reply`.
///
/// Returns the typed verdict and the parsed payload (kept for display).
pub fn parse_verdict(reply: &str) -> Result<(GeneratedVerdict, serde_json::Value), AnalysisError> {
    let block = extract_json_block(reply)?;

    let payload: serde_json::Value = serde_json::from_str(block)
        .map_err(|e| AnalysisError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let verdict: GeneratedVerdict = serde_json::from_value(payload.clone())
        .map_err(|e| AnalysisError::MalformedResponse(format!("unexpected JSON shape: {e}")))?;

    Ok((verdict, payload))
}
