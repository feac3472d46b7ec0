//! Model loaders backed by JSON artifacts on disk.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use floodwise_core::model::{FloodModel, ModelLoader};
use floodwise_types::error::PredictionError;

use super::ModelArtifact;

/// Reads and validates the artifact on every call.
#[derive(Debug, Clone)]
pub struct JsonModelLoader {
    path: PathBuf,
}

impl JsonModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelLoader for JsonModelLoader {
    fn load(&self) -> Result<Arc<dyn FloodModel>, PredictionError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            PredictionError::ModelUnavailable(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))
        })?;

        let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|e| {
            PredictionError::ModelUnavailable(format!(
                "cannot parse {}: {e}",
                self.path.display()
            ))
        })?;

        let model = artifact.into_model()?;
        tracing::debug!(path = %self.path.display(), kind = model.kind(), "model artifact loaded");
        Ok(Arc::new(model))
    }
}

/// Loads once and shares the model for the rest of the process.
///
/// Failed loads are not cached, so a later request retries.
pub struct CachedModelLoader<L> {
    inner: L,
    model: OnceLock<Arc<dyn FloodModel>>,
}

impl<L: ModelLoader> CachedModelLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            model: OnceLock::new(),
        }
    }
}

impl<L: ModelLoader> ModelLoader for CachedModelLoader<L> {
    fn load(&self) -> Result<Arc<dyn FloodModel>, PredictionError> {
        if let Some(model) = self.model.get() {
            return Ok(model.clone());
        }
        let model = self.inner.load()?;
        Ok(self.model.get_or_init(|| model).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodwise_core::adapter::PredictionAdapter;
    use floodwise_core::template::apply_template;
    use floodwise_types::prediction::RiskLevel;
    use floodwise_types::wizard::{SessionState, WizardPhase};
    use tempfile::TempDir;

    fn shipped_model() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/flood_model.json")
    }

    fn predict_template(name: &str) -> floodwise_types::prediction::PredictionResult {
        let mut session = SessionState::new();
        assert!(apply_template(&mut session, name));
        assert_eq!(session.phase, WizardPhase::Review);
        let adapter = PredictionAdapter::new(JsonModelLoader::new(shipped_model()));
        adapter.predict(&session.form).unwrap()
    }

    #[test]
    fn test_sumatera_is_very_high_risk() {
        let result = predict_template("Sumatera");
        assert!(result.probability > 0.65, "got {}", result.probability);
        assert_eq!(result.risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_belanda_is_low_risk() {
        let result = predict_template("Belanda");
        assert!(result.probability < 0.35, "got {}", result.probability);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_missing_file_is_model_unavailable() {
        let tmp = TempDir::new().unwrap();
        let loader = JsonModelLoader::new(tmp.path().join("absent.json"));
        let err = loader.load().err().unwrap();
        assert!(matches!(err, PredictionError::ModelUnavailable(msg) if msg.contains("absent.json")));
    }

    #[test]
    fn test_corrupt_file_is_model_unavailable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("model.json");
        std::fs::write(&path, "\u{80}pickle bytes").unwrap();
        let err = JsonModelLoader::new(&path).load().err().unwrap();
        assert!(matches!(err, PredictionError::ModelUnavailable(_)));
    }

    #[test]
    fn test_cached_loader_reuses_model_and_retries_failures() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("model.json");
        let loader = CachedModelLoader::new(JsonModelLoader::new(&path));

        assert!(loader.load().is_err());

        std::fs::copy(shipped_model(), &path).unwrap();
        let first = loader.load().unwrap();

        std::fs::remove_file(&path).unwrap();
        let second = loader.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
