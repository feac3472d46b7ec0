//! JSON model artifacts.
//!
//! An artifact is a serialized generalized linear model over the twenty
//! canonical features:
//!
//! ```json
//! {
//!   "kind": "linear",
//!   "feature_names": ["MonsoonIntensity", "TopographyDrainage", "..."],
//!   "coefficients": [0.0057, 0.0057, "..."],
//!   "intercept": -0.0533
//! }
//! ```
//!
//! `linear` scores `intercept + w.x`; `logistic` passes that through the
//! sigmoid. The feature names must match the canonical order exactly.

pub mod loader;

use serde::{Deserialize, Serialize};

use floodwise_core::model::FloodModel;
use floodwise_types::error::PredictionError;
use floodwise_types::schema::{Feature, FeatureVector, FEATURE_COUNT};

pub use loader::{CachedModelLoader, JsonModelLoader};

/// Link function applied to the linear predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Linear,
    Logistic,
}

/// On-disk representation of a model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub kind: ModelKind,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl ModelArtifact {
    /// Check the artifact against the canonical schema and build a model.
    ///
    /// Any mismatch makes the artifact incompatible, reported as
    /// [`PredictionError::ModelUnavailable`].
    pub fn into_model(self) -> Result<GeneralizedLinearModel, PredictionError> {
        let expected: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
        if self.feature_names != expected {
            return Err(PredictionError::ModelUnavailable(format!(
                "incompatible feature columns: expected {expected:?}, got {:?}",
                self.feature_names
            )));
        }

        let coefficients: [f64; FEATURE_COUNT] =
            self.coefficients.as_slice().try_into().map_err(|_| {
                PredictionError::ModelUnavailable(format!(
                    "expected {FEATURE_COUNT} coefficients, got {}",
                    self.coefficients.len()
                ))
            })?;

        if !self.intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PredictionError::ModelUnavailable(
                "artifact contains non-finite parameters".to_string(),
            ));
        }

        Ok(GeneralizedLinearModel {
            kind: self.kind,
            coefficients,
            intercept: self.intercept,
        })
    }
}

/// A linear or logistic regression model.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralizedLinearModel {
    kind: ModelKind,
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl GeneralizedLinearModel {
    fn linear_predictor(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }
}

impl FloodModel for GeneralizedLinearModel {
    fn kind(&self) -> &str {
        match self.kind {
            ModelKind::Linear => "linear",
            ModelKind::Logistic => "logistic",
        }
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let z = self.linear_predictor(features);
        if !z.is_finite() {
            return Err(PredictionError::Inference(
                "linear predictor is not finite".to_string(),
            ));
        }
        Ok(match self.kind {
            ModelKind::Linear => z,
            ModelKind::Logistic => 1.0 / (1.0 + (-z).exp()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(kind: ModelKind, weight: f64, intercept: f64) -> ModelArtifact {
        ModelArtifact {
            kind,
            feature_names: Feature::ALL.iter().map(|f| f.as_str().to_string()).collect(),
            coefficients: vec![weight; FEATURE_COUNT],
            intercept,
        }
    }

    #[test]
    fn test_linear_model_scores_dot_product() {
        let model = artifact(ModelKind::Linear, 0.005, 0.1).into_model().unwrap();
        let features = FeatureVector::new([5.0; FEATURE_COUNT]);
        let score = model.predict(&features).unwrap();
        assert!((score - 0.6).abs() < 1e-12);
        assert_eq!(model.kind(), "linear");
    }

    #[test]
    fn test_logistic_model_applies_sigmoid() {
        let model = artifact(ModelKind::Logistic, 0.0, 0.0).into_model().unwrap();
        let score = model.predict(&FeatureVector::new([3.0; FEATURE_COUNT])).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
        assert_eq!(model.kind(), "logistic");
    }

    #[test]
    fn test_reordered_columns_are_incompatible() {
        let mut a = artifact(ModelKind::Linear, 0.005, 0.0);
        a.feature_names.swap(0, 1);
        let err = a.into_model().unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable(msg) if msg.contains("incompatible")));
    }

    #[test]
    fn test_wrong_coefficient_count_is_incompatible() {
        let mut a = artifact(ModelKind::Linear, 0.005, 0.0);
        a.coefficients.pop();
        assert!(matches!(
            a.into_model(),
            Err(PredictionError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_non_finite_parameters_are_rejected() {
        let a = artifact(ModelKind::Linear, 0.005, f64::INFINITY);
        assert!(a.into_model().is_err());
    }

    #[test]
    fn test_unknown_kind_fails_to_deserialize() {
        let json = r#"{"kind":"forest","feature_names":[],"coefficients":[],"intercept":0.0}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }
}
