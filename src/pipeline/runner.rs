//! Comparison runner: drives both moderation pipelines for one input.
//!
//! [`Comparator`] owns the two pipelines and the pricing.  It can be used
//! directly ([`Comparator::compare`]) or through [`PipelineOrchestrator`],
//! which listens for [`PipelineCommand`]s from the UI and reports each
//! panel's outcome as a [`PipelineResult`] as soon as it is known.
//!
//! # Flow
//!
//! ```text
//! PipelineCommand::Analyze { text }
//!   ├─▶ ModerationPipeline::moderate(text)              ─▶ ModerationComplete | Failed
//!   └─▶ GenerativePipeline::moderate_via_generation(text) ─▶ GenerationComplete | Failed
//! ```
//!
//! The two branches run concurrently on the same task and share nothing but
//! the (immutable) input text.  A failure in one never cancels the other.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppConfig, PricingConfig};
use crate::cost::CostEstimate;
use crate::error::AnalysisError;
use crate::llm::{GenerationReport, GenerativePipeline, SamplingParams, TextGenerator};
use crate::moderation::{ModerationPipeline, ModerationService};
use crate::verdict::ModerationVerdict;

use super::state::Panel;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the orchestrator.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Run both pipelines on `text`.
    Analyze { text: String },
}

/// Per-panel outcomes delivered from the orchestrator to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineResult {
    ModerationComplete(ModerationVerdict),
    GenerationComplete(GenerationReport),
    /// A pipeline failed; `message` is the rendered [`AnalysisError`].
    Failed { panel: Panel, message: String },
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Both outcomes and both cost estimates for one input.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub moderation_cost: CostEstimate,
    pub generation_cost: CostEstimate,
    pub moderation: Result<ModerationVerdict, AnalysisError>,
    pub generation: Result<GenerationReport, AnalysisError>,
}

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

/// The two pipelines plus pricing.  Holds no per-call state.
pub struct Comparator {
    moderation: ModerationPipeline,
    generation: GenerativePipeline,
    pricing: PricingConfig,
}

impl Comparator {
    pub fn new(
        moderation: ModerationPipeline,
        generation: GenerativePipeline,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            moderation,
            generation,
            pricing,
        }
    }

    /// Wire both pipelines from config around the given backends.
    pub fn from_config(
        config: &AppConfig,
        service: Arc<dyn ModerationService>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self::new(
            ModerationPipeline::from_config(service, &config.moderation),
            GenerativePipeline::new(generator, SamplingParams::from_config(&config.generation)),
            config.pricing.clone(),
        )
    }

    /// `(moderation, generation)` cost estimates for `text`.  No network.
    pub fn estimate_costs(&self, text: &str) -> (CostEstimate, CostEstimate) {
        (
            CostEstimate::for_text(text, self.pricing.moderation),
            CostEstimate::for_text(text, self.pricing.generation),
        )
    }

    /// Run both pipelines concurrently and collect both outcomes.
    pub async fn compare(&self, text: &str) -> Comparison {
        let (moderation_cost, generation_cost) = self.estimate_costs(text);
        let (moderation, generation) = tokio::join!(
            self.moderation.moderate(text),
            self.generation.moderate_via_generation(text),
        );

        Comparison {
            moderation_cost,
            generation_cost,
            moderation,
            generation,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Serves [`PipelineCommand`]s from the UI.
///
/// Create with [`PipelineOrchestrator::new`], then spawn
/// [`run`](Self::run) on the tokio runtime.
pub struct PipelineOrchestrator {
    comparator: Arc<Comparator>,
}

impl PipelineOrchestrator {
    pub fn new(comparator: Arc<Comparator>) -> Self {
        Self { comparator }
    }

    /// Run until `command_rx` is closed.
    pub async fn run(
        self,
        mut command_rx: mpsc::Receiver<PipelineCommand>,
        result_tx: mpsc::Sender<PipelineResult>,
    ) {
        while let Some(cmd) = command_rx.recv().await {
            match cmd {
                PipelineCommand::Analyze { text } => {
                    self.handle_analyze(&text, &result_tx).await;
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    /// Start both pipelines and send each outcome the moment it settles.
    async fn handle_analyze(&self, text: &str, result_tx: &mpsc::Sender<PipelineResult>) {
        log::debug!("pipeline: analyze ({} chars)", text.chars().count());

        let moderation = async {
            let result = match self.comparator.moderation.moderate(text).await {
                Ok(verdict) => PipelineResult::ModerationComplete(verdict),
                Err(e) => PipelineResult::Failed {
                    panel: Panel::Moderation,
                    message: e.to_string(),
                },
            };
            let _ = result_tx.send(result).await;
        };

        let generation = async {
            let result = match self.comparator.generation.moderate_via_generation(text).await {
                Ok(report) => PipelineResult::GenerationComplete(report),
                Err(e) => PipelineResult::Failed {
                    panel: Panel::Generation,
                    message: e.to_string(),
                },
            };
            let _ = result_tx.send(result).await;
        };

        tokio::join!(moderation, generation);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::ModerationCategory;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Moderation service with a canned answer that records its input.
    struct FakeModeration {
        answer: Result<Vec<ModerationCategory>, AnalysisError>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ModerationService for FakeModeration {
        async fn moderate_text(
            &self,
            text: &str,
        ) -> Result<Vec<ModerationCategory>, AnalysisError> {
            self.seen.lock().unwrap().push(text.to_string());
            self.answer.clone()
        }
    }

    /// Generator with a canned reply that records the prompt it saw.
    struct FakeGenerator {
        reply: Result<String, AnalysisError>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _params: &SamplingParams,
        ) -> Result<String, AnalysisError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    /// Generator that waits until released, to order panel completion.
    struct GatedGenerator {
        gate: Arc<Notify>,
        reply: String,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &SamplingParams,
        ) -> Result<String, AnalysisError> {
            self.gate.notified().await;
            Ok(self.reply.clone())
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    const INPUT: &str = "you are a piece of ****";
    const REPLY: &str = r#"Here you go: {"reason": "insulting language", "toxic": true} Thanks"#;

    fn moderation(answer: Result<Vec<ModerationCategory>, AnalysisError>) -> Arc<FakeModeration> {
        Arc::new(FakeModeration {
            answer,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn generator(reply: Result<String, AnalysisError>) -> Arc<FakeGenerator> {
        Arc::new(FakeGenerator {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn comparator(
        service: Arc<dyn ModerationService>,
        gen: Arc<dyn TextGenerator>,
    ) -> Arc<Comparator> {
        Arc::new(Comparator::from_config(&AppConfig::default(), service, gen))
    }

    async fn run_once(comparator: Arc<Comparator>, text: &str) -> Vec<PipelineResult> {
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (res_tx, mut res_rx) = mpsc::channel(8);

        cmd_tx
            .send(PipelineCommand::Analyze { text: text.into() })
            .await
            .unwrap();
        drop(cmd_tx);

        PipelineOrchestrator::new(comparator).run(cmd_rx, res_tx).await;

        let mut out = Vec::new();
        while let Some(r) = res_rx.recv().await {
            out.push(r);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Comparator
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn end_to_end_both_pipelines_flag_insult() {
        let service = moderation(Ok(vec![ModerationCategory::new("Toxic", 0.85)]));
        let gen = generator(Ok(REPLY.into()));
        let cmp = comparator(service.clone(), gen.clone());

        let c = cmp.compare(INPUT).await;

        let verdict = c.moderation.unwrap();
        assert!(verdict.toxic);
        assert_eq!(verdict.categories, vec![ModerationCategory::new("Toxic", 0.85)]);

        let report = c.generation.unwrap();
        assert!(report.verdict.toxic);
        assert_eq!(report.verdict.reason.as_deref(), Some("insulting language"));

        assert_eq!(c.moderation_cost.display(10), "$0.0001150000");
        assert_eq!(c.generation_cost.display(10), "$0.0000115000");
    }

    #[tokio::test]
    async fn both_pipelines_see_identical_input() {
        let service = moderation(Ok(Vec::new()));
        let gen = generator(Ok("{}".into()));
        let cmp = comparator(service.clone(), gen.clone());

        let text = "  mixed\ncase Text {with braces}  ";
        cmp.compare(text).await;

        assert_eq!(service.seen.lock().unwrap().as_slice(), [text.to_string()]);
        let prompts = gen.seen.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(text));
    }

    #[tokio::test]
    async fn empty_input_costs_zero() {
        let cmp = comparator(moderation(Ok(Vec::new())), generator(Ok("{}".into())));
        let c = cmp.compare("").await;

        assert_eq!(c.moderation_cost.amount, 0.0);
        assert_eq!(c.generation_cost.amount, 0.0);
        assert!(!c.moderation.unwrap().toxic);
        assert!(!c.generation.unwrap().verdict.toxic);
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_the_other() {
        let cmp = comparator(
            moderation(Err(AnalysisError::Backend("connection refused".into()))),
            generator(Ok(REPLY.into())),
        );
        let c = cmp.compare(INPUT).await;

        assert!(matches!(c.moderation, Err(AnalysisError::Backend(_))));
        assert!(c.generation.unwrap().verdict.toxic);
    }

    // -----------------------------------------------------------------------
    // Orchestrator
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn orchestrator_emits_one_result_per_panel() {
        let cmp = comparator(
            moderation(Ok(vec![ModerationCategory::new("Toxic", 0.85)])),
            generator(Ok(REPLY.into())),
        );
        let results = run_once(cmp, INPUT).await;

        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .any(|r| matches!(r, PipelineResult::ModerationComplete(v) if v.toxic)));
        assert!(results
            .iter()
            .any(|r| matches!(r, PipelineResult::GenerationComplete(g) if g.verdict.toxic)));
    }

    #[tokio::test]
    async fn orchestrator_reports_failure_for_its_panel_only() {
        let cmp = comparator(
            moderation(Err(AnalysisError::Backend("connection refused".into()))),
            generator(Ok(REPLY.into())),
        );
        let results = run_once(cmp, INPUT).await;

        assert!(results.contains(&PipelineResult::Failed {
            panel: Panel::Moderation,
            message: "backend request failed: connection refused".into(),
        }));
        assert!(results
            .iter()
            .any(|r| matches!(r, PipelineResult::GenerationComplete(_))));
    }

    #[tokio::test]
    async fn orchestrator_reports_malformed_reply() {
        let cmp = comparator(
            moderation(Ok(Vec::new())),
            generator(Ok("I think it is fine.".into())),
        );
        let results = run_once(cmp, "hello").await;

        assert!(results.iter().any(|r| matches!(
            r,
            PipelineResult::Failed { panel: Panel::Generation, message }
                if message.starts_with("malformed backend response")
        )));
    }

    /// The moderation result is delivered while the generation call is still
    /// in flight, so its panel can render first.
    #[tokio::test]
    async fn faster_panel_is_reported_first() {
        let gate = Arc::new(Notify::new());
        let cmp = comparator(
            moderation(Ok(Vec::new())),
            Arc::new(GatedGenerator {
                gate: Arc::clone(&gate),
                reply: "{}".into(),
            }),
        );

        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (res_tx, mut res_rx) = mpsc::channel(8);
        let handle = tokio::spawn(PipelineOrchestrator::new(cmp).run(cmd_rx, res_tx));

        cmd_tx
            .send(PipelineCommand::Analyze { text: "x".into() })
            .await
            .unwrap();

        let first = res_rx.recv().await.unwrap();
        assert!(matches!(first, PipelineResult::ModerationComplete(_)));

        gate.notify_one();
        let second = res_rx.recv().await.unwrap();
        assert!(matches!(second, PipelineResult::GenerationComplete(_)));

        drop(cmd_tx);
        handle.await.unwrap();
    }
}
