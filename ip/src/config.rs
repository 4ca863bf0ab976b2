// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Process-wide default embedding strategy.
//!
//! The default is consulted by [`MultiAddress`](crate::MultiAddress) constructors which are not
//! given an explicit strategy.  It may be set once, during process initialization; until then
//! [`Mapped`] is used.

use crate::strategy::{EmbeddingStrategy, Mapped, StrategyKind};
use std::sync::{Arc, OnceLock};
use tracing::info;

/// The default strategy, once set
static DEFAULT_EMBEDDING_STRATEGY: OnceLock<Arc<dyn EmbeddingStrategy>> = OnceLock::new();

/// Error returned when the default strategy is set a second time to something else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("default embedding strategy is already set to {current}, refusing to change it to {rejected}")]
pub struct DefaultStrategyError {
    /// Name of the strategy in effect
    pub current: &'static str,
    /// Name of the strategy which was refused
    pub rejected: &'static str,
}

/// Set the process-wide default embedding strategy.
///
/// Setting the same strategy (by name) again is accepted and has no effect.
///
/// # Errors
///
/// Returns [`DefaultStrategyError`] if a strategy with a different name has already been set.
pub fn set_default_embedding_strategy(
    strategy: Arc<dyn EmbeddingStrategy>,
) -> Result<(), DefaultStrategyError> {
    let rejected = strategy.name();
    match DEFAULT_EMBEDDING_STRATEGY.set(strategy) {
        Ok(()) => {
            info!("default embedding strategy set to {rejected}");
            Ok(())
        }
        Err(_) => {
            let current = default_embedding_strategy().name();
            if current == rejected {
                Ok(())
            } else {
                Err(DefaultStrategyError { current, rejected })
            }
        }
    }
}

/// The process-wide default embedding strategy, [`Mapped`] if none has been set.
#[must_use]
pub fn default_embedding_strategy() -> Arc<dyn EmbeddingStrategy> {
    match DEFAULT_EMBEDDING_STRATEGY.get() {
        Some(strategy) => Arc::clone(strategy),
        None => Arc::new(Mapped),
    }
}

/// Embedding configuration, as read from a configuration file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmbeddingConfig {
    /// Strategy used for addresses constructed without an explicit one
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl EmbeddingConfig {
    /// Make the configured strategy the process-wide default.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultStrategyError`] if a different default has already been set.
    pub fn install(&self) -> Result<(), DefaultStrategyError> {
        set_default_embedding_strategy(self.strategy.strategy())
    }
}
