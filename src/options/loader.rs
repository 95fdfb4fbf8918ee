//! One-shot option loading
//!
//! A loader fetches once per source identity. Failures are logged and leave an
//! empty option list; the field stays usable (just empty) until [`OptionLoader::retry`].

use serde_json::Value;
use tracing::{debug, warn};

use super::OptionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct OptionLoader {
    identity: Option<String>,
    state: LoadState,
    options: Vec<Value>,
    last_error: Option<String>,
}

impl OptionLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Interaction is disabled while a load is in flight
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn options(&self) -> &[Value] {
        &self.options
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether `source` differs from the one last loaded
    pub fn needs_load(&self, source: &dyn OptionSource) -> bool {
        self.identity.as_deref() != Some(source.identity().as_str())
    }

    /// Mark a load of `identity` as started. Returns `false` when that
    /// identity is already loaded or loading.
    pub fn begin(&mut self, identity: &str) -> bool {
        if self.identity.as_deref() == Some(identity) {
            return false;
        }
        self.identity = Some(identity.to_string());
        self.state = LoadState::Loading;
        true
    }

    /// Record the outcome of a load. Results for an identity that has since
    /// been replaced are discarded.
    pub fn finish(&mut self, identity: &str, result: anyhow::Result<Vec<Value>>) {
        if self.identity.as_deref() != Some(identity) {
            debug!(identity, "discarding options for a replaced source");
            return;
        }
        match result {
            Ok(options) => {
                debug!(identity, count = options.len(), "options loaded");
                self.options = options;
                self.last_error = None;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                warn!(identity, error = %e, "option loading failed; using an empty list");
                self.options.clear();
                self.last_error = Some(e.to_string());
                self.state = LoadState::Failed;
            }
        }
    }

    /// Load from `source` unless it is the source already loaded
    pub async fn ensure_loaded(&mut self, source: &dyn OptionSource) -> &[Value] {
        let identity = source.identity();
        if self.begin(&identity) {
            let result = source.load().await;
            self.finish(&identity, result);
        }
        &self.options
    }

    /// Forget the current source and load again
    pub async fn retry(&mut self, source: &dyn OptionSource) -> &[Value] {
        self.identity = None;
        self.ensure_loaded(source).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FnOptions, StaticOptions};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_loads_once_per_identity() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let source = FnOptions::new("users", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(vec![json!("a")])
            }
        });

        let mut loader = OptionLoader::new();
        assert_eq!(loader.ensure_loaded(&source).await, &[json!("a")]);
        loader.ensure_loaded(&source).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.state(), LoadState::Loaded);

        loader.retry(&source).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_yields_empty_list() {
        let source = FnOptions::new("broken", || async {
            Err::<Vec<Value>, _>(anyhow::anyhow!("boom"))
        });
        let mut loader = OptionLoader::new();
        assert!(loader.ensure_loaded(&source).await.is_empty());
        assert_eq!(loader.state(), LoadState::Failed);
        assert_eq!(loader.last_error(), Some("boom"));
    }

    #[tokio::test]
    async fn test_new_identity_reloads() {
        let mut loader = OptionLoader::new();
        loader.ensure_loaded(&StaticOptions::new(vec![json!(1)])).await;
        let second = StaticOptions::new(vec![json!(2), json!(3)]);
        assert!(loader.needs_load(&second));
        assert_eq!(loader.ensure_loaded(&second).await.len(), 2);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut loader = OptionLoader::new();
        assert!(loader.begin("first"));
        assert!(loader.is_loading());
        assert!(loader.begin("second"));
        loader.finish("first", Ok(vec![json!("old")]));
        assert!(loader.options().is_empty());
        assert!(loader.is_loading());
        loader.finish("second", Ok(vec![json!("new")]));
        assert_eq!(loader.options(), &[json!("new")]);
    }
}
