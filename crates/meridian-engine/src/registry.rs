//! Keyed store of strategy contexts.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use meridian_data::FundDataSource;

use crate::context::StrategyContext;
use crate::error::EngineResult;

/// Engine tuning knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Staleness threshold for memoized attribution; `None` keeps the
    /// first successful fetch for the context's lifetime.
    pub attribution_stale_after: Option<Duration>,
}

/// Process-wide store of strategy contexts, keyed by strategy name.
///
/// Constructed once at startup and injected into request handlers.
/// Contexts are created lazily on first access and never evicted; a
/// concurrent first access may load the same strategy twice, after which
/// one equivalent entry wins. Unknown strategies yield `Ok(None)` rather
/// than an error so the HTTP layer can map them to 404.
pub struct StrategyRegistry {
    contexts: DashMap<String, Arc<StrategyContext>>,
    source: Arc<dyn FundDataSource>,
    config: EngineConfig,
}

impl StrategyRegistry {
    /// Create a registry over a fund data source with default config.
    #[must_use]
    pub fn new(source: Arc<dyn FundDataSource>) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Create a registry with explicit engine config.
    #[must_use]
    pub fn with_config(source: Arc<dyn FundDataSource>, config: EngineConfig) -> Self {
        Self {
            contexts: DashMap::new(),
            source,
            config,
        }
    }

    /// Fetch the context for a strategy, loading it on first access.
    pub async fn get_or_create(&self, name: &str) -> EngineResult<Option<Arc<StrategyContext>>> {
        if let Some(ctx) = self.contexts.get(name) {
            return Ok(Some(ctx.clone()));
        }

        match StrategyContext::load(name, self.source.as_ref(), self.config.attribution_stale_after)
            .await?
        {
            Some(ctx) => {
                let ctx = Arc::new(ctx);
                self.contexts.insert(name.to_string(), ctx.clone());
                Ok(Some(ctx))
            }
            None => Ok(None),
        }
    }

    /// Number of contexts loaded so far.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.contexts.len()
    }
}
