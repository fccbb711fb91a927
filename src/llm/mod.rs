//! Prompted-LLM moderation pipeline.
//!
//! This module provides:
//! * [`TextGenerator`]: async trait implemented by all generation backends.
//! * [`VertexGenerator`]: Vertex AI publisher-model `:predict` backend.
//! * [`SamplingParams`]: fixed generation parameters.
//! * [`PromptBuilder`]: builds the toxicity classification prompt.
//! * [`extract_json_block`] / [`parse_verdict`]: brace-scanning JSON
//!   extraction from free-form replies.
//! * [`GenerativePipeline`]: ties the above into a verdict.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use moderation_compare::config::AppConfig;
//! use moderation_compare::llm::{GenerativePipeline, SamplingParams, VertexGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let generator = Arc::new(VertexGenerator::from_config(&config.generation));
//!     let pipeline =
//!         GenerativePipeline::new(generator, SamplingParams::from_config(&config.generation));
//!
//!     let report = pipeline
//!         .moderate_via_generation("you are a piece of ****")
//!         .await
//!         .unwrap();
//!     println!("{}", report.payload);
//! }
//! ```

pub mod extract;
pub mod generator;
pub mod pipeline;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use extract::{extract_json_block, parse_verdict, GeneratedVerdict};
pub use generator::{SamplingParams, TextGenerator, VertexGenerator};
pub use pipeline::{GenerationReport, GenerativePipeline};
pub use prompt::{PromptBuilder, RESPONSE_SHAPE};
