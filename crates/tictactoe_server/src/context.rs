//! Explicitly constructed service dependencies.

use crate::config::{Environment, ServerConfig};
use crate::storage::{GameStorage, InMemoryGameStorage};
use std::sync::Arc;
use tictactoe_core::{StandardGameEngine, Strategy, StrategyKind};
use tracing::{debug, info, instrument};

/// Storage, rules engine and default AI shared by every request.
///
/// Cloning is cheap; clones share the same store and AI.
#[derive(Clone)]
pub struct AppContext {
    environment: Environment,
    storage: Arc<dyn GameStorage>,
    engine: StandardGameEngine,
    ai: Arc<Strategy<StandardGameEngine>>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("environment", &self.environment)
            .field("ai", &self.ai.kind())
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Assembles a context from already built parts.
    pub fn new(
        environment: Environment,
        storage: Arc<dyn GameStorage>,
        engine: StandardGameEngine,
        ai: Strategy<StandardGameEngine>,
    ) -> Self {
        Self {
            environment,
            storage,
            engine,
            ai: Arc::new(ai),
        }
    }

    /// Builds storage, engine and AI for a configuration.
    #[instrument(
        skip(config),
        fields(environment = %config.environment(), ai_type = %config.ai_type())
    )]
    pub fn from_config(config: &ServerConfig) -> Self {
        let environment = *config.environment();
        let storage = storage_for(environment);
        let engine = StandardGameEngine::new();
        let ai = Strategy::from_kind(*config.ai_type(), engine);
        info!("Application context ready");
        Self::new(environment, storage, engine, ai)
    }

    /// Environment the context was built for.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Game store.
    pub fn storage(&self) -> &dyn GameStorage {
        self.storage.as_ref()
    }

    /// Rules engine.
    pub fn engine(&self) -> StandardGameEngine {
        self.engine
    }

    /// Default AI.
    pub fn ai(&self) -> &Strategy<StandardGameEngine> {
        &self.ai
    }

    /// Kind of the default AI.
    pub fn ai_kind(&self) -> StrategyKind {
        self.ai.kind()
    }
}

// Every environment is in-memory for now; durable storage is out of scope.
fn storage_for(environment: Environment) -> Arc<dyn GameStorage> {
    debug!(%environment, "Using in-memory storage");
    Arc::new(InMemoryGameStorage::new())
}
