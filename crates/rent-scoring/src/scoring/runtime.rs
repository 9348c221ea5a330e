//! Lazily instantiated, process-wide scoring engine.
//!
//! The first caller drives instantiation; every concurrent first caller awaits
//! the same in-flight initialization. The outcome, success or failure, is kept
//! for the life of the process.

use super::config::ScoringConfig;
use super::engine::{EngineError, ScoringEngine};
use super::model::{DealScoreInput, DealScoreResult, LeverageScoreInput, LeverageScoreResult};
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Async once-cell for a scoring engine.
#[derive(Debug, Default)]
pub struct EngineCell {
    engine: OnceCell<Result<Arc<ScoringEngine>, EngineError>>,
    instantiations: AtomicUsize,
}

impl EngineCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the engine, running `init` only if no caller has yet.
    pub async fn get_or_instantiate<F, Fut>(
        &self,
        init: F,
    ) -> Result<Arc<ScoringEngine>, EngineError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ScoringConfig, EngineError>>,
    {
        self.engine
            .get_or_init(|| async move {
                self.instantiations.fetch_add(1, Ordering::SeqCst);
                let engine = init().await.and_then(ScoringEngine::new);
                match &engine {
                    Ok(engine) => info!(
                        reference_year = engine.reference_year(),
                        "scoring engine instantiated"
                    ),
                    Err(err) => warn!(error = %err, "scoring engine failed to instantiate"),
                }
                engine.map(Arc::new)
            })
            .await
            .clone()
    }

    /// Number of times instantiation has started. This is one unless a caller
    /// was cancelled mid-initialization, in which case the next caller starts
    /// over.
    pub fn instantiations(&self) -> usize {
        self.instantiations.load(Ordering::SeqCst)
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.initialized()
    }
}

static SHARED_ENGINE: OnceLock<EngineCell> = OnceLock::new();

fn shared_cell() -> &'static EngineCell {
    SHARED_ENGINE.get_or_init(EngineCell::new)
}

/// Process-wide engine configured from `SCORING_CONFIG_PATH` (or defaults).
pub async fn shared_engine() -> Result<Arc<ScoringEngine>, EngineError> {
    shared_cell()
        .get_or_instantiate(|| async { ScoringConfig::from_env().await.map_err(EngineError::from) })
        .await
}

/// Process-wide engine configured from `config_path`, or the defaults when
/// `None`. Whichever initialization runs first decides the tables.
pub async fn shared_engine_from(
    config_path: Option<PathBuf>,
) -> Result<Arc<ScoringEngine>, EngineError> {
    shared_cell()
        .get_or_instantiate(|| async move {
            let config = match config_path {
                Some(path) => ScoringConfig::from_path(path).await,
                None => Ok(ScoringConfig::default()),
            };
            config.map_err(EngineError::from)
        })
        .await
}

pub async fn calculate_deal_score(input: DealScoreInput) -> Result<DealScoreResult, EngineError> {
    let engine = shared_engine().await?;
    Ok(engine.deal_score(&input))
}

pub async fn calculate_leverage_score(
    input: LeverageScoreInput,
) -> Result<LeverageScoreResult, EngineError> {
    let engine = shared_engine().await?;
    Ok(engine.leverage_score(&input))
}
