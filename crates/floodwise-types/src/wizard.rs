//! Wizard phase and per-session state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::FormState;
use crate::schema::Category;

/// Where a session currently is in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WizardPhase {
    /// Editing the category at `step` (index into [`Category::ALL`]).
    Editing { step: usize },
    /// All categories filled; showing the review table.
    Review,
    /// Prediction requested; showing the result panel.
    Predicted,
}

impl WizardPhase {
    /// The first editing step.
    pub const START: WizardPhase = WizardPhase::Editing { step: 0 };

    /// Category being edited, when in an editing phase.
    pub fn editing_category(self) -> Option<Category> {
        match self {
            WizardPhase::Editing { step } => Category::from_step(step),
            _ => None,
        }
    }
}

impl Default for WizardPhase {
    fn default() -> Self {
        WizardPhase::START
    }
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardPhase::Editing { step } => write!(f, "editing({step})"),
            WizardPhase::Review => write!(f, "review"),
            WizardPhase::Predicted => write!(f, "predicted"),
        }
    }
}

/// Everything one user session owns: its phase and its form.
///
/// Sessions never share state; each interaction handler mutates exactly one
/// `SessionState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: WizardPhase,
    pub form: FormState,
}

impl SessionState {
    /// A fresh session at `Editing(0)` with an empty form.
    pub fn new() -> Self {
        Self::default()
    }
}
