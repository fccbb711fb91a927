//! Shell state machine and per-panel display state.
//!
//! [`ShellState`] has two states: `Idle` (waiting for a trigger) and
//! `Analyzing` (both pipelines in flight).  [`ComparisonView`] folds
//! [`PipelineResult`] events into per-panel [`PanelState`]s and moves back to
//! `Idle` once both panels have settled, whatever their outcome.
//!
//! ```text
//! Idle ──trigger──▶ Analyzing ──both panels Ready/Failed──▶ Idle
//! ```

use crate::llm::GenerationReport;
use crate::verdict::ModerationVerdict;

use super::runner::PipelineResult;

// ---------------------------------------------------------------------------
// ShellState
// ---------------------------------------------------------------------------

/// Whether a comparison is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    /// Waiting for the user to press "Analyze".
    #[default]
    Idle,
    /// Both pipelines have been started and at least one is still running.
    Analyzing,
}

impl ShellState {
    /// The UI disables the trigger while busy.
    pub fn is_busy(&self) -> bool {
        matches!(self, ShellState::Analyzing)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShellState::Idle => "Idle",
            ShellState::Analyzing => "Analyzing...",
        }
    }
}

// ---------------------------------------------------------------------------
// Panel / PanelState
// ---------------------------------------------------------------------------

/// One side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Managed moderation service.
    Moderation,
    /// Prompted LLM.
    Generation,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Moderation => "Google Moderation API",
            Panel::Generation => "Gen AI Custom Solution",
        }
    }
}

/// What a panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    /// Nothing analyzed yet.
    Empty,
    /// Pipeline running.
    Pending,
    Ready(T),
    /// Pipeline failed; the message is shown in place of a result.
    Failed(String),
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        PanelState::Empty
    }
}

impl<T> PanelState<T> {
    /// `true` once the pipeline produced a result or an error.
    pub fn is_settled(&self) -> bool {
        matches!(self, PanelState::Ready(_) | PanelState::Failed(_))
    }
}

// ---------------------------------------------------------------------------
// ComparisonView
// ---------------------------------------------------------------------------

/// UI-side model of one comparison.
#[derive(Debug, Default)]
pub struct ComparisonView {
    pub shell: ShellState,
    pub moderation: PanelState<ModerationVerdict>,
    pub generation: PanelState<GenerationReport>,
}

impl ComparisonView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Analyzing` and mark both panels pending.
    ///
    /// Returns `false` (and changes nothing) if a comparison is already
    /// running.
    pub fn begin(&mut self) -> bool {
        if self.shell.is_busy() {
            return false;
        }
        self.shell = ShellState::Analyzing;
        self.moderation = PanelState::Pending;
        self.generation = PanelState::Pending;
        true
    }

    /// Record one pipeline outcome.  Results arriving while idle are stale
    /// and ignored.
    pub fn apply(&mut self, result: PipelineResult) {
        if !self.shell.is_busy() {
            log::debug!("shell: ignoring result received while idle");
            return;
        }

        match result {
            PipelineResult::ModerationComplete(verdict) => {
                self.moderation = PanelState::Ready(verdict);
            }
            PipelineResult::GenerationComplete(report) => {
                self.generation = PanelState::Ready(report);
            }
            PipelineResult::Failed { panel, message } => {
                log::error!("shell: {} failed: {message}", panel.title());
                match panel {
                    Panel::Moderation => self.moderation = PanelState::Failed(message),
                    Panel::Generation => self.generation = PanelState::Failed(message),
                }
            }
        }

        if self.moderation.is_settled() && self.generation.is_settled() {
            self.shell = ShellState::Idle;
        }
    }

    /// Abandon a running comparison (e.g. the orchestrator went away).
    pub fn abort(&mut self, message: &str) {
        if !self.moderation.is_settled() {
            self.moderation = PanelState::Failed(message.to_string());
        }
        if !self.generation.is_settled() {
            self.generation = PanelState::Failed(message.to_string());
        }
        self.shell = ShellState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
