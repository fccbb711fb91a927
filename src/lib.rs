//! Side-by-side comparison of two ways to flag toxic text: a managed
//! moderation API and a prompted LLM, each with an estimated per-call cost.
//!
//! * [`moderation`]: category scores from a moderation service + threshold.
//! * [`llm`]: prompt, generate, extract the JSON verdict from the reply.
//! * [`cost`]: character-based cost estimates.
//! * [`pipeline`]: runs both pipelines for the UI.
//! * [`app`]: the egui window.

pub mod app;
pub mod config;
pub mod cost;
pub mod error;
pub mod llm;
pub mod moderation;
pub mod pipeline;
pub mod verdict;

pub use error::AnalysisError;
