//! Workflow steps and the step sequencer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Steps in the invitation workflow, in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    /// Create or pick the event
    #[default]
    Event,
    /// Pick a template from the catalog
    Template,
    /// Colors, fonts and feature toggles
    Customize,
    /// Guest list management
    Guests,
    /// Read-only review
    Preview,
    /// Platform fee and payment confirmation
    Send,
}

impl WorkflowStep {
    /// All steps in workflow order
    pub const ALL: [WorkflowStep; 6] = [
        WorkflowStep::Event,
        WorkflowStep::Template,
        WorkflowStep::Customize,
        WorkflowStep::Guests,
        WorkflowStep::Preview,
        WorkflowStep::Send,
    ];

    /// First step of the workflow
    pub const FIRST: WorkflowStep = WorkflowStep::Event;

    /// Terminal step of the workflow
    pub const LAST: WorkflowStep = WorkflowStep::Send;

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            WorkflowStep::Event => 0,
            WorkflowStep::Template => 1,
            WorkflowStep::Customize => 2,
            WorkflowStep::Guests => 3,
            WorkflowStep::Preview => 4,
            WorkflowStep::Send => 5,
        }
    }

    /// Step at a position in `ALL`
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Progress percentage shown for this step
    pub fn progress(self) -> u8 {
        match self {
            WorkflowStep::Event => 0,
            WorkflowStep::Template => 20,
            WorkflowStep::Customize => 40,
            WorkflowStep::Guests => 60,
            WorkflowStep::Preview => 80,
            WorkflowStep::Send => 100,
        }
    }

    /// The following step, or `None` at the end
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, or `None` at the start
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::Event => "event",
            WorkflowStep::Template => "template",
            WorkflowStep::Customize => "customize",
            WorkflowStep::Guests => "guests",
            WorkflowStep::Preview => "preview",
            WorkflowStep::Send => "send",
        }
    }

    /// Header label
    pub fn label(self) -> &'static str {
        match self {
            WorkflowStep::Event => "Event Details",
            WorkflowStep::Template => "Choose Template",
            WorkflowStep::Customize => "Customize",
            WorkflowStep::Guests => "Guest List",
            WorkflowStep::Preview => "Preview",
            WorkflowStep::Send => "Send",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step name that is not part of the workflow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown workflow step: {0}")]
pub struct UnknownStep(pub String);

impl FromStr for WorkflowStep {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowStep::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| UnknownStep(s.trim().to_string()))
    }
}

/// A change of the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: WorkflowStep,
    pub to: WorkflowStep,
}

/// Holds the current step and moves it around the fixed step order.
///
/// Moves return the resulting `Transition`, or `None` when the step did not
/// change (clamped at either end, or a jump to the current step).
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    current: WorkflowStep,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WorkflowStep {
        self.current
    }

    pub fn progress(&self) -> u8 {
        self.current.progress()
    }

    /// Jump to any step; prerequisites are not checked
    pub fn go_to(&mut self, step: WorkflowStep) -> Option<Transition> {
        if step == self.current {
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: step,
        };
        self.current = step;
        Some(transition)
    }

    pub fn next(&mut self) -> Option<Transition> {
        let next = self.current.next()?;
        self.go_to(next)
    }

    pub fn previous(&mut self) -> Option<Transition> {
        let previous = self.current.previous()?;
        self.go_to(previous)
    }

    pub fn is_first(&self) -> bool {
        self.current == WorkflowStep::FIRST
    }

    pub fn is_last(&self) -> bool {
        self.current == WorkflowStep::LAST
    }
}
