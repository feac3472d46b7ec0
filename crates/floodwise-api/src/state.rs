//! Application state wiring all services together.
//!
//! AppState holds the prediction adapter and the per-session wizard store
//! used by both the CLI and the REST API. The adapter is generic over its
//! model loader; AppState pins it to a boxed loader so the cached and
//! uncached variants share one type.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use floodwise_core::adapter::PredictionAdapter;
use floodwise_core::model::ModelLoader;
use floodwise_infra::config::{load_config, load_config_file, resolve_model_path, MODEL_PATH_ENV};
use floodwise_infra::filesystem::resolve_data_dir;
use floodwise_infra::model::{CachedModelLoader, JsonModelLoader};
use floodwise_types::config::AppConfig;

use crate::sessions::SessionStore;

/// Adapter pinned to a shared, type-erased loader.
pub type ConcretePredictionAdapter = PredictionAdapter<Arc<dyn ModelLoader>>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<ConcretePredictionAdapter>,
    /// Independent wizard sessions keyed by session id, expired when idle.
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub model_path: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, wire the model loader.
    pub async fn init(config_path: Option<&Path>, model_override: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let config = match config_path {
            Some(path) => load_config_file(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_config(&data_dir).await,
        };

        let env_model = std::env::var(MODEL_PATH_ENV).ok();
        let model_path = resolve_model_path(&config, model_override, env_model.as_deref());

        let json_loader = JsonModelLoader::new(&model_path);
        let loader: Arc<dyn ModelLoader> = if config.cache_model {
            Arc::new(CachedModelLoader::new(json_loader))
        } else {
            Arc::new(json_loader)
        };

        tracing::info!(
            model = %model_path.display(),
            cache = config.cache_model,
            data_dir = %data_dir.display(),
            "application state initialized"
        );

        Ok(Self::with_loader(config, loader, data_dir, model_path))
    }

    /// Build state around an explicit loader.
    pub fn with_loader(
        config: AppConfig,
        loader: Arc<dyn ModelLoader>,
        data_dir: PathBuf,
        model_path: PathBuf,
    ) -> Self {
        Self {
            adapter: Arc::new(PredictionAdapter::new(loader)),
            sessions: Arc::new(SessionStore::new(Duration::from_secs(
                config.session_ttl_secs.max(1),
            ))),
            config: Arc::new(config),
            data_dir,
            model_path,
        }
    }
}
