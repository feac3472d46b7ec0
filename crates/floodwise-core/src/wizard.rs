//! Wizard state machine.
//!
//! `SessionState` lives in `floodwise-types`; this module provides an
//! extension trait (`WizardExt`) with the transitions (next, back, predict,
//! reset) and the read-only views each phase renders. Every transition
//! either succeeds and mutates the session or fails and leaves it untouched.
//!
//! ```text
//! Editing(0) -next-> Editing(1) -next-> ... Editing(N-1) -next-> Review
//!     ^                  |back                                  |back -> Editing(0)
//!     |                  v                                      |predict
//!     +------reset------ Predicted <----------------------------+
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use floodwise_types::error::WizardError;
use floodwise_types::schema::{
    in_range, snap_to_step, Category, Feature, CATEGORY_COUNT, MAX_SCORE, MIN_SCORE, SCORE_STEP,
};
use floodwise_types::wizard::{SessionState, WizardPhase};

/// One editable control in a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureControl {
    pub feature: Feature,
    pub description: &'static str,
    /// Saved value, or 5.0 when the category has not been submitted yet.
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Everything needed to render one editing step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub category: Category,
    pub title: &'static str,
    pub step_index: usize,
    pub total_steps: usize,
    pub can_go_back: bool,
    /// `"next"`, or `"review"` on the last step.
    pub next_label: &'static str,
    pub progress: f64,
    pub controls: Vec<FeatureControl>,
}

/// One row of the review table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub feature: Feature,
    pub value: Option<f64>,
}

/// Review table section for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSection {
    pub category: Category,
    pub title: &'static str,
    pub rows: Vec<ReviewRow>,
}

/// Extension trait for `SessionState` transitions and views.
pub trait WizardExt {
    /// Save the submitted values for the current step and advance.
    ///
    /// Keys are feature column names. Omitted features take the value the
    /// step currently displays. The whole step is rejected if any value is
    /// out of range or names a feature outside the step's category.
    fn submit_step(&mut self, values: &BTreeMap<String, f64>) -> Result<WizardPhase, WizardError>;

    /// Move one step back; from review, return to the first step.
    fn go_back(&mut self) -> Result<WizardPhase, WizardError>;

    /// Enter the prediction phase. Re-entering from `Predicted` is allowed.
    fn begin_prediction(&mut self) -> Result<WizardPhase, WizardError>;

    /// Clear the form and return to the first step.
    fn reset(&mut self) -> WizardPhase;

    /// Render data for the current editing step, if editing.
    fn step_view(&self) -> Option<StepView>;

    /// Review table covering every category in wizard order.
    fn review(&self) -> Vec<ReviewSection>;

    /// Fraction of the wizard completed, in `[0, 1]`.
    fn progress(&self) -> f64;
}

fn invalid(action: &'static str, phase: WizardPhase) -> WizardError {
    WizardError::InvalidTransition {
        action,
        phase: phase.to_string(),
    }
}

impl WizardExt for SessionState {
    fn submit_step(&mut self, values: &BTreeMap<String, f64>) -> Result<WizardPhase, WizardError> {
        let (step, category) = match self.phase {
            WizardPhase::Editing { step } => match Category::from_step(step) {
                Some(category) => (step, category),
                None => return Err(invalid("next", self.phase)),
            },
            phase => return Err(invalid("next", phase)),
        };

        for name in values.keys() {
            let belongs = name
                .parse::<Feature>()
                .map(|f| f.category() == category)
                .unwrap_or(false);
            if !belongs {
                return Err(WizardError::UnknownFeature {
                    feature: name.clone(),
                    category,
                });
            }
        }

        let mut saved = BTreeMap::new();
        for feature in category.features() {
            let value = values
                .get(feature.as_str())
                .copied()
                .unwrap_or_else(|| self.form.display_value(*feature));
            if !in_range(value) {
                return Err(WizardError::OutOfRange {
                    feature: *feature,
                    value,
                });
            }
            saved.insert(*feature, snap_to_step(value));
        }

        self.form.set_category(category, saved);
        self.phase = if step + 1 < CATEGORY_COUNT {
            WizardPhase::Editing { step: step + 1 }
        } else {
            WizardPhase::Review
        };
        tracing::debug!(category = category.slug(), phase = %self.phase, "step submitted");
        Ok(self.phase)
    }

    fn go_back(&mut self) -> Result<WizardPhase, WizardError> {
        self.phase = match self.phase {
            WizardPhase::Editing { step } if step > 0 => WizardPhase::Editing { step: step - 1 },
            // Review always returns to the first step, keeping the form.
            WizardPhase::Review => WizardPhase::START,
            phase => return Err(invalid("back", phase)),
        };
        Ok(self.phase)
    }

    fn begin_prediction(&mut self) -> Result<WizardPhase, WizardError> {
        match self.phase {
            WizardPhase::Review | WizardPhase::Predicted => {
                self.phase = WizardPhase::Predicted;
                Ok(self.phase)
            }
            phase => Err(invalid("predict", phase)),
        }
    }

    fn reset(&mut self) -> WizardPhase {
        self.form.clear();
        self.phase = WizardPhase::START;
        self.phase
    }

    fn step_view(&self) -> Option<StepView> {
        let WizardPhase::Editing { step } = self.phase else {
            return None;
        };
        let category = Category::from_step(step)?;

        let controls = category
            .features()
            .iter()
            .map(|feature| FeatureControl {
                feature: *feature,
                description: feature.description(),
                value: self.form.display_value(*feature),
                min: MIN_SCORE,
                max: MAX_SCORE,
                step: SCORE_STEP,
            })
            .collect();

        Some(StepView {
            category,
            title: category.title(),
            step_index: step,
            total_steps: CATEGORY_COUNT,
            can_go_back: step > 0,
            next_label: if step + 1 == CATEGORY_COUNT { "review" } else { "next" },
            progress: self.progress(),
            controls,
        })
    }

    fn review(&self) -> Vec<ReviewSection> {
        Category::ALL
            .iter()
            .map(|category| ReviewSection {
                category: *category,
                title: category.title(),
                rows: category
                    .features()
                    .iter()
                    .map(|feature| ReviewRow {
                        feature: *feature,
                        value: self.form.value(*feature),
                    })
                    .collect(),
            })
            .collect()
    }

    fn progress(&self) -> f64 {
        match self.phase {
            WizardPhase::Editing { step } => step as f64 / CATEGORY_COUNT as f64,
            WizardPhase::Review | WizardPhase::Predicted => 1.0,
        }
    }
}
