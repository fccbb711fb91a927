//! Managed moderation-service pipeline.
//!
//! This module provides:
//! * [`ModerationService`]: async trait for anything that scores text into
//!   categories.
//! * [`LanguageApiClient`]: Cloud Natural Language `moderateText` backend.
//! * [`ModerationPipeline`]: applies the toxicity threshold to a service's
//!   categories.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use moderation_compare::config::AppConfig;
//! use moderation_compare::moderation::{LanguageApiClient, ModerationPipeline};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let service = Arc::new(LanguageApiClient::from_config(&config.moderation));
//!     let pipeline = ModerationPipeline::from_config(service, &config.moderation);
//!
//!     let verdict = pipeline.moderate("you are a piece of ****").await.unwrap();
//!     println!("toxic = {}", verdict.toxic);
//! }
//! ```

pub mod pipeline;
pub mod service;

pub use pipeline::{is_content_toxic, ModerationPipeline};
pub use service::{LanguageApiClient, ModerationService};
