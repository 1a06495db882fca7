use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use summary_engine::{EngineError, ModelName, T5Summarizer};

type Loader<S> = Box<dyn Fn(ModelName) -> Result<S, EngineError> + Send + Sync>;

/// Process-wide cache of loaded model handles, keyed by model name.
///
/// Loading weights takes seconds, so a handle is created at most once per
/// name and shared from then on. The cache lock is held across the load
/// itself: when two callers race on the same cold name, one performs the
/// load and the other blocks until the handle is ready, so exactly one
/// load happens. A failed load leaves no residual state and can be
/// retried.
pub struct ModelRegistry<S = T5Summarizer> {
    loader: Loader<S>,
    cache: Mutex<HashMap<ModelName, Arc<S>>>,
}

impl ModelRegistry<T5Summarizer> {
    pub fn new() -> Self {
        Self::with_loader(T5Summarizer::load)
    }
}

impl Default for ModelRegistry<T5Summarizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ModelRegistry<S> {
    /// Build a registry around a custom loader. Tests use this to count
    /// load operations without touching real weights.
    pub fn with_loader(
        loader: impl Fn(ModelName) -> Result<S, EngineError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            loader: Box::new(loader),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached handle for `name`, loading it on first use.
    #[tracing::instrument(skip(self), fields(model = %name))]
    pub fn get_or_load(&self, name: ModelName) -> Result<Arc<S>, EngineError> {
        let mut cache = self.cache.lock().map_err(|_| EngineError::ModelLoad {
            message: "model cache lock poisoned by a previous panic".into(),
        })?;

        if let Some(handle) = cache.get(&name) {
            return Ok(Arc::clone(handle));
        }

        tracing::info!("Loading model on first use");
        let handle = Arc::new((self.loader)(name)?);
        cache.insert(name, Arc::clone(&handle));
        Ok(handle)
    }

    /// Names with a ready handle in the cache.
    pub fn loaded(&self) -> Vec<ModelName> {
        self.cache
            .lock()
            .map(|cache| cache.keys().copied().collect())
            .unwrap_or_default()
    }
}
