//! Side-by-side moderation comparison window: egui/eframe application.
//!
//! # Architecture
//!
//! [`ComparisonApp`] is the top-level [`eframe::App`].  It owns the text
//! input, a [`ComparisonView`] and two channel endpoints:
//!
//! * `command_tx`: sends [`PipelineCommand`] to the pipeline orchestrator.
//! * `result_rx` : receives per-panel [`PipelineResult`]s.
//!
//! Cost estimates are recomputed from the input every frame; they never
//! touch the network.
//!
//! # Panel states
//!
//! | State | Visual |
//! |-------|--------|
//! | `Empty` | Costs only |
//! | `Pending` | Spinner + "Analyzing..." |
//! | `Ready` | Pass/fail banner + detail (category table or JSON) |
//! | `Failed` | "An error occurred: …" in orange |

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::config::{AppConfig, CostRate};
use crate::cost::CostEstimate;
use crate::llm::GenerationReport;
use crate::pipeline::{ComparisonView, Panel, PanelState, PipelineCommand, PipelineResult};
use crate::verdict::ModerationVerdict;

const SAFE: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);
const UNSAFE: egui::Color32 = egui::Color32::from_rgb(255, 80, 80);
const ERROR: egui::Color32 = egui::Color32::from_rgb(255, 136, 68);
const MUTED: egui::Color32 = egui::Color32::from_rgb(140, 140, 140);

// ---------------------------------------------------------------------------
// Rendering helpers (pure, unit-tested)
// ---------------------------------------------------------------------------

/// `(name, confidence)` rows of the moderation category table.
pub fn category_rows(verdict: &ModerationVerdict) -> Vec<(String, String)> {
    verdict
        .categories
        .iter()
        .map(|c| (c.name.clone(), format!("{:.2}", c.confidence)))
        .collect()
}

/// Banner for the moderation panel.  `None` when the service returned no
/// categories; the panel then shows only "No moderation categories found."
pub fn moderation_banner(verdict: &ModerationVerdict) -> Option<&'static str> {
    if verdict.categories.is_empty() {
        None
    } else {
        Some(verdict.label())
    }
}

/// Banner for the generative panel; a toxic verdict carries its reason.
pub fn generation_banner(verdict: &ModerationVerdict) -> String {
    if verdict.toxic {
        format!(
            "{} - {}",
            verdict.label(),
            verdict.reason.as_deref().unwrap_or("")
        )
    } else {
        verdict.label().to_string()
    }
}

/// Text shown in place of a result when a pipeline fails.
pub fn error_text(message: &str) -> String {
    format!("An error occurred: {message}")
}

// ---------------------------------------------------------------------------
// ComparisonApp
// ---------------------------------------------------------------------------

/// eframe application: the comparison window.
pub struct ComparisonApp {
    /// Raw text as typed; sent unchanged to both pipelines.
    pub input: String,
    /// Shell state machine and panel contents.
    pub view: ComparisonView,

    /// Spinner animation phase (increases each frame).
    spinner_phase: f32,

    // ── Channels ─────────────────────────────────────────────────────────
    /// Send commands to the background pipeline orchestrator.
    pub command_tx: mpsc::Sender<PipelineCommand>,
    /// Receive per-panel results from the background pipeline orchestrator.
    pub result_rx: mpsc::Receiver<PipelineResult>,

    /// Application configuration (read-only after startup).
    pub config: AppConfig,
}

impl ComparisonApp {
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        result_rx: mpsc::Receiver<PipelineResult>,
        config: AppConfig,
    ) -> Self {
        Self {
            input: String::new(),
            view: ComparisonView::new(),
            spinner_phase: 0.0,
            command_tx,
            result_rx,
            config,
        }
    }

    // ── Trigger / channel polling ────────────────────────────────────────

    /// Start a comparison of the current input.  Empty input is allowed.
    pub fn trigger(&mut self) {
        if !self.view.begin() {
            return;
        }
        log::info!("analyze: {} chars", self.input.chars().count());

        let cmd = PipelineCommand::Analyze {
            text: self.input.clone(),
        };
        if let Err(e) = self.command_tx.try_send(cmd) {
            log::error!("analyze: could not reach pipeline: {e}");
            self.view.abort(&format!("could not start analysis: {e}"));
        }
    }

    /// Drain all pending pipeline results (non-blocking).
    pub fn poll_results(&mut self) {
        loop {
            match self.result_rx.try_recv() {
                Ok(result) => self.view.apply(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.view.shell.is_busy() {
                        self.view.abort("pipeline stopped unexpectedly");
                    }
                    break;
                }
            }
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    /// Title + "Costs" section shared by both panels.
    fn draw_cost_header(&self, ui: &mut egui::Ui, panel: Panel, rate: CostRate) {
        ui.heading(panel.title());
        ui.add_space(6.0);
        ui.label(egui::RichText::new("Costs").strong().size(15.0));

        let cost = CostEstimate::for_text(&self.input, rate);
        ui.monospace(cost.display(self.config.ui.cost_precision));

        if panel == Panel::Moderation {
            ui.label(
                egui::RichText::new(&self.config.pricing.moderation_free_tier_note)
                    .color(MUTED)
                    .size(11.0),
            );
        }

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Results").strong().size(15.0));
    }

    fn draw_moderation(&self, ui: &mut egui::Ui) {
        self.draw_cost_header(ui, Panel::Moderation, self.config.pricing.moderation);

        match &self.view.moderation {
            PanelState::Empty => {}
            PanelState::Pending => self.draw_pending(ui),
            PanelState::Failed(message) => draw_error(ui, message),
            PanelState::Ready(verdict) => {
                let Some(banner) = moderation_banner(verdict) else {
                    ui.label("No moderation categories found.");
                    return;
                };
                draw_banner(ui, verdict.toxic, banner);
                ui.add_space(4.0);

                egui::Grid::new("moderation_categories")
                    .num_columns(2)
                    .striped(true)
                    .spacing([24.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("Category");
                        ui.strong("Confidence");
                        ui.end_row();
                        for (name, confidence) in category_rows(verdict) {
                            ui.label(name);
                            ui.monospace(confidence);
                            ui.end_row();
                        }
                    });
            }
        }
    }

    fn draw_generation(&self, ui: &mut egui::Ui) {
        self.draw_cost_header(ui, Panel::Generation, self.config.pricing.generation);

        match &self.view.generation {
            PanelState::Empty => {}
            PanelState::Pending => self.draw_pending(ui),
            PanelState::Failed(message) => draw_error(ui, message),
            PanelState::Ready(report) => draw_report(ui, report),
        }
    }

    fn draw_pending(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(format!("{} Analyzing...", self.spinner_char()))
                .color(egui::Color32::from_rgb(68, 136, 255)),
        );
    }

    /// A simple rotating ASCII spinner character driven by `spinner_phase`.
    fn spinner_char(&self) -> char {
        let chars = ['|', '/', '-', '\\'];
        let idx = (self.spinner_phase as usize) % chars.len();
        chars[idx]
    }
}

fn draw_banner(ui: &mut egui::Ui, toxic: bool, text: &str) {
    let color = if toxic { UNSAFE } else { SAFE };
    ui.label(egui::RichText::new(text).color(color).size(14.0).strong());
}

fn draw_error(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(error_text(message)).color(ERROR));
}

fn draw_report(ui: &mut egui::Ui, report: &GenerationReport) {
    draw_banner(ui, report.verdict.toxic, &generation_banner(&report.verdict));
    ui.add_space(4.0);

    let pretty = serde_json::to_string_pretty(&report.payload)
        .unwrap_or_else(|_| report.payload.to_string());
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.monospace(pretty);
    });
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for ComparisonApp {
    /// Called every frame by eframe.  Polls results, then renders the input
    /// row and both panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        if self.view.shell.is_busy() {
            self.spinner_phase += 0.08;
            if self.spinner_phase >= 4.0 {
                self.spinner_phase = 0.0;
            }
            // ~15 fps for the spinner and result polling
            ctx.request_repaint_after(Duration::from_millis(66));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Content Moderation Comparison");
            ui.add_space(6.0);

            ui.label("Enter text to analyze");
            ui.add(
                egui::TextEdit::multiline(&mut self.input)
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );

            ui.horizontal(|ui| {
                let busy = self.view.shell.is_busy();
                if ui.add_enabled(!busy, egui::Button::new("Analyze")).clicked() {
                    self.trigger();
                }
                ui.label(egui::RichText::new(self.view.shell.label()).color(MUTED));
            });

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |columns| {
                    self.draw_moderation(&mut columns[0]);
                    self.draw_generation(&mut columns[1]);
                });
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("comparison window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ShellState;
    use crate::verdict::ModerationCategory;

    fn make_app() -> (
        ComparisonApp,
        mpsc::Receiver<PipelineCommand>,
        mpsc::Sender<PipelineResult>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(4);
        let (result_tx, result_rx) = mpsc::channel(8);
        let app = ComparisonApp::new(command_tx, result_rx, AppConfig::default());
        (app, command_rx, result_tx)
    }

    #[test]
    fn category_table_rows() {
        let verdict = ModerationVerdict {
            toxic: true,
            reason: None,
            categories: vec![ModerationCategory::new("Toxic", 0.85)],
        };
        assert_eq!(
            category_rows(&verdict),
            vec![("Toxic".to_string(), "0.85".to_string())]
        );
    }

    #[test]
    fn empty_categories_show_no_banner() {
        let verdict = ModerationVerdict::default();
        assert_eq!(moderation_banner(&verdict), None);

        let verdict = ModerationVerdict {
            toxic: false,
            reason: None,
            categories: vec![ModerationCategory::new("Insult", 0.1)],
        };
        assert_eq!(moderation_banner(&verdict), Some("Content is safe"));
    }

    #[test]
    fn banner_includes_reason_only_when_toxic() {
        let mut verdict = ModerationVerdict {
            toxic: true,
            reason: Some("insulting language".into()),
            categories: Vec::new(),
        };
        assert_eq!(
            generation_banner(&verdict),
            "Content is not safe - insulting language"
        );

        verdict.toxic = false;
        assert_eq!(generation_banner(&verdict), "Content is safe");
    }

    #[test]
    fn error_text_prefix() {
        assert_eq!(
            error_text("backend request failed: HTTP 403 Forbidden"),
            "An error occurred: backend request failed: HTTP 403 Forbidden"
        );
    }

    #[test]
    fn trigger_sends_raw_input_and_enters_analyzing() {
        let (mut app, mut command_rx, _result_tx) = make_app();
        app.input = "  raw Input  ".into();

        app.trigger();

        assert_eq!(app.view.shell, ShellState::Analyzing);
        match command_rx.try_recv().expect("command sent") {
            PipelineCommand::Analyze { text } => assert_eq!(text, "  raw Input  "),
        }
    }

    #[test]
    fn empty_input_is_accepted() {
        let (mut app, mut command_rx, _result_tx) = make_app();
        app.trigger();
        assert!(command_rx.try_recv().is_ok());
    }

    #[test]
    fn second_trigger_while_busy_sends_nothing() {
        let (mut app, mut command_rx, _result_tx) = make_app();
        app.trigger();
        app.trigger();

        assert!(command_rx.try_recv().is_ok());
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn poll_applies_results_and_returns_to_idle() {
        let (mut app, _command_rx, result_tx) = make_app();
        app.trigger();

        result_tx
            .try_send(PipelineResult::Failed {
                panel: Panel::Moderation,
                message: "backend request failed: timeout".into(),
            })
            .unwrap();
        result_tx
            .try_send(PipelineResult::GenerationComplete(GenerationReport {
                verdict: ModerationVerdict {
                    toxic: false,
                    reason: Some(String::new()),
                    categories: Vec::new(),
                },
                payload: serde_json::json!({}),
            }))
            .unwrap();

        app.poll_results();

        assert_eq!(app.view.shell, ShellState::Idle);
        assert!(matches!(app.view.moderation, PanelState::Failed(_)));
        assert!(matches!(app.view.generation, PanelState::Ready(_)));
    }

    #[test]
    fn closed_pipeline_aborts_running_comparison() {
        let (mut app, _command_rx, result_tx) = make_app();
        app.trigger();
        drop(result_tx);

        app.poll_results();

        assert_eq!(app.view.shell, ShellState::Idle);
        assert!(matches!(app.view.moderation, PanelState::Failed(_)));
    }

    #[test]
    fn unreachable_pipeline_fails_both_panels() {
        let (mut app, command_rx, _result_tx) = make_app();
        drop(command_rx);

        app.trigger();

        assert_eq!(app.view.shell, ShellState::Idle);
        assert!(matches!(app.view.moderation, PanelState::Failed(_)));
        assert!(matches!(app.view.generation, PanelState::Failed(_)));
    }
}
