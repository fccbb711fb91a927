//! Comparison orchestrator module.
//!
//! This module runs both moderation pipelines for one input and exposes the
//! state the UI renders every frame.
//!
//! # Architecture
//!
//! ```text
//! ComparisonApp (egui, main thread)
//!        │  PipelineCommand::Analyze { text }   (mpsc)
//!        ▼
//! PipelineOrchestrator::run()  ← async tokio task
//!        ├─ ModerationPipeline        ─┐
//!        └─ GenerativePipeline        ─┤  concurrent, independent
//!                                      ▼
//!                      PipelineResult per panel (mpsc)
//!        ▼
//! ComparisonView::apply()  → Idle once both panels settle
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use moderation_compare::config::AppConfig;
//! use moderation_compare::llm::VertexGenerator;
//! use moderation_compare::moderation::LanguageApiClient;
//! use moderation_compare::pipeline::{Comparator, PipelineCommand, PipelineOrchestrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let comparator = Arc::new(Comparator::from_config(
//!         &config,
//!         Arc::new(LanguageApiClient::from_config(&config.moderation)),
//!         Arc::new(VertexGenerator::from_config(&config.generation)),
//!     ));
//!
//!     let (command_tx, command_rx) = mpsc::channel(16);
//!     let (result_tx, mut result_rx) = mpsc::channel(32);
//!     tokio::spawn(PipelineOrchestrator::new(comparator).run(command_rx, result_tx));
//!
//!     command_tx
//!         .send(PipelineCommand::Analyze { text: "hello".into() })
//!         .await
//!         .unwrap();
//!     while let Some(result) = result_rx.recv().await {
//!         println!("{result:?}");
//!     }
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{Comparator, Comparison, PipelineCommand, PipelineOrchestrator, PipelineResult};
pub use state::{ComparisonView, Panel, PanelState, ShellState};
