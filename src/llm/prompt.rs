//! Prompt builder for LLM-based toxicity classification.
//!
//! The prompt has one substitution point (the user's text, embedded
//! verbatim) and one JSON shape example that steers the model towards a
//! parseable reply.

// ---------------------------------------------------------------------------
// Instruction text
// ---------------------------------------------------------------------------

/// Shape the model is asked to answer in.
pub const RESPONSE_SHAPE: &str = r#"{"reason": "", "toxic": false}"#;

const INSTRUCTION: &str = "\
You are an experienced content moderation system that classifies whether content is toxic.
Content can also be sarcastic and still be toxic; keep that in mind.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the classification prompt.
///
/// # Example
/// ```rust
/// use moderation_compare::llm::PromptBuilder;
///
/// let prompt = PromptBuilder::new().build("you are a piece of ****");
/// assert!(prompt.contains(r#"{"reason": "", "toxic": false}"#));
/// assert!(prompt.ends_with("you are a piece of ****\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    _private: (),
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the flat prompt string.
    ///
    /// Structure (in order):
    /// 1. Moderation instruction
    /// 2. Output format request with [`RESPONSE_SHAPE`]
    /// 3. `Content:` label followed by `text`
    pub fn build(&self, text: &str) -> String {
        let mut prompt = String::with_capacity(INSTRUCTION.len() + text.len() + 128);
        prompt.push_str(INSTRUCTION);
        prompt.push_str("\n\nReturn the result as valid JSON in the following format:\n");
        prompt.push_str(RESPONSE_SHAPE);
        prompt.push_str("\n\nContent:\n");
        prompt.push_str(text);
        prompt.push('\n');
        prompt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
