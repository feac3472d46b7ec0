use thiserror::Error;

use crate::schema::{Category, Feature};

/// Errors from parsing schema identifiers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Errors from driving the wizard state machine.
///
/// A rejected action never mutates the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("action '{action}' is not available in phase {phase}")]
    InvalidTransition { action: &'static str, phase: String },

    #[error("{feature} must be between 0.0 and 10.0, got {value}")]
    OutOfRange { feature: Feature, value: f64 },

    #[error("feature '{feature}' does not belong to step '{category}'")]
    UnknownFeature { feature: String, category: Category },
}

/// Errors from the prediction adapter.
///
/// Every variant is local to one prediction attempt; the session that
/// requested it stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("missing feature: {0}")]
    MissingFeature(Feature),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {message}")]
    Parse { path: String, message: String },
}
