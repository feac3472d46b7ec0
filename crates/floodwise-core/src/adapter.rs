//! Prediction adapter.
//!
//! Flattens a form into the canonical feature vector, asks the model for a
//! score and classifies it. All failures come back as [`PredictionError`]
//! values; nothing here panics on bad model output.

use floodwise_types::error::PredictionError;
use floodwise_types::form::FormState;
use floodwise_types::prediction::PredictionResult;
use floodwise_types::schema::{Feature, FeatureVector, FEATURE_COUNT};

use crate::model::ModelLoader;

/// Assemble the model input from a form, in canonical feature order.
///
/// Fails with [`PredictionError::MissingFeature`] naming the first canonical
/// feature without a value.
pub fn feature_vector(form: &FormState) -> Result<FeatureVector, PredictionError> {
    let flat = form.flatten();
    let mut values = [0.0; FEATURE_COUNT];
    for feature in Feature::ALL {
        values[feature.index()] = *flat
            .get(&feature)
            .ok_or(PredictionError::MissingFeature(feature))?;
    }
    Ok(FeatureVector::new(values))
}

/// Runs predictions against models obtained from a [`ModelLoader`].
pub struct PredictionAdapter<L> {
    loader: L,
}

impl<L: ModelLoader> PredictionAdapter<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Predict from a fully populated form.
    pub fn predict(&self, form: &FormState) -> Result<PredictionResult, PredictionError> {
        let features = feature_vector(form)?;
        self.predict_vector(&features)
    }

    /// Predict from an already ordered feature vector.
    pub fn predict_vector(
        &self,
        features: &FeatureVector,
    ) -> Result<PredictionResult, PredictionError> {
        let model = self.loader.load()?;
        let raw = model.predict(features)?;

        if !raw.is_finite() {
            return Err(PredictionError::Inference(format!(
                "model returned a non-finite score ({raw})"
            )));
        }

        let probability = raw.clamp(0.0, 1.0);
        if probability != raw {
            tracing::warn!(raw, model = model.kind(), "model score outside [0, 1], clamped");
        }

        let result = PredictionResult::from_probability(probability);
        tracing::info!(
            probability,
            risk = %result.risk_level,
            model = model.kind(),
            "prediction complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::model::FloodModel;
    use crate::template::{apply_template, find_template};
    use floodwise_types::prediction::RiskLevel;
    use floodwise_types::schema::Category;
    use floodwise_types::wizard::SessionState;

    /// Returns the mean feature score divided by ten.
    struct MeanModel;

    impl FloodModel for MeanModel {
        fn kind(&self) -> &str {
            "mean"
        }

        fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
            let sum: f64 = features.as_slice().iter().sum();
            Ok(sum / FEATURE_COUNT as f64 / 10.0)
        }
    }

    struct FixedModel(f64);

    impl FloodModel for FixedModel {
        fn kind(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    struct FailingModel;

    impl FloodModel for FailingModel {
        fn kind(&self) -> &str {
            "failing"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
            Err(PredictionError::Inference("shape mismatch".to_string()))
        }
    }

    struct StaticLoader {
        model: Arc<dyn FloodModel>,
        loads: AtomicUsize,
    }

    impl StaticLoader {
        fn new(model: impl FloodModel + 'static) -> Self {
            Self {
                model: Arc::new(model),
                loads: AtomicUsize::new(0),
            }
        }
    }

    impl ModelLoader for StaticLoader {
        fn load(&self) -> Result<Arc<dyn FloodModel>, PredictionError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.model.clone())
        }
    }

    struct MissingLoader;

    impl ModelLoader for MissingLoader {
        fn load(&self) -> Result<Arc<dyn FloodModel>, PredictionError> {
            Err(PredictionError::ModelUnavailable("no artifact".to_string()))
        }
    }

    fn preset_form(name: &str) -> FormState {
        let mut session = SessionState::new();
        assert!(apply_template(&mut session, name));
        session.form
    }

    #[test]
    fn test_feature_vector_is_canonical_order() {
        let form = preset_form("Sumatera");
        let vector = feature_vector(&form).unwrap();
        let template = find_template("Sumatera").unwrap();

        assert_eq!(vector.as_slice().len(), FEATURE_COUNT);
        assert_eq!(vector.as_slice(), &template.values[..]);
        let order: Vec<Feature> = vector.iter().map(|(f, _)| f).collect();
        assert_eq!(order, Feature::ALL.to_vec());
        assert_eq!(vector.get(Feature::RiverManagement), 8.5);
    }

    #[test]
    fn test_feature_vector_reports_first_missing_feature() {
        let full = preset_form("Belanda");
        let mut form = FormState::new();
        for (category, values) in full.iter() {
            if category != Category::Infrastructure {
                form.set_category(category, values.clone());
            }
        }

        let err = feature_vector(&form).unwrap_err();
        assert_eq!(err, PredictionError::MissingFeature(Feature::DamsQuality));
    }

    #[test]
    fn test_predict_scores_form() {
        let adapter = PredictionAdapter::new(StaticLoader::new(MeanModel));
        let form = preset_form("Belanda");

        let result = adapter.predict(&form).unwrap();
        assert!(result.probability < 0.35);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(adapter.loader.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_feature_checked_before_loading() {
        let adapter = PredictionAdapter::new(StaticLoader::new(FixedModel(0.5)));
        let err = adapter.predict(&FormState::new()).unwrap_err();
        assert_eq!(err, PredictionError::MissingFeature(Feature::MonsoonIntensity));
        assert_eq!(adapter.loader.loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_unavailable_is_returned() {
        let adapter = PredictionAdapter::new(MissingLoader);
        let err = adapter.predict(&preset_form("Sumatera")).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable(_)));
    }

    #[test]
    fn test_inference_error_is_returned() {
        let adapter = PredictionAdapter::new(StaticLoader::new(FailingModel));
        let err = adapter.predict(&preset_form("Sumatera")).unwrap_err();
        assert_eq!(err, PredictionError::Inference("shape mismatch".to_string()));
    }

    #[test]
    fn test_non_finite_score_is_inference_error() {
        let adapter = PredictionAdapter::new(StaticLoader::new(FixedModel(f64::NAN)));
        let err = adapter.predict(&preset_form("Sumatera")).unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        let adapter = PredictionAdapter::new(StaticLoader::new(FixedModel(1.07)));
        let result = adapter.predict(&preset_form("Sumatera")).unwrap();
        assert_eq!(result.probability, 1.0);
        assert_eq!(result.risk_level, RiskLevel::VeryHigh);

        let adapter = PredictionAdapter::new(StaticLoader::new(FixedModel(-0.02)));
        let result = adapter.predict(&preset_form("Belanda")).unwrap();
        assert_eq!(result.probability, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_loader_called_once_per_prediction() {
        let adapter = PredictionAdapter::new(StaticLoader::new(FixedModel(0.4)));
        let form = preset_form("Belanda");
        adapter.predict(&form).unwrap();
        adapter.predict(&form).unwrap();
        assert_eq!(adapter.loader.loads.load(Ordering::SeqCst), 2);
    }
}
