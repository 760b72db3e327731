use std::sync::Arc;

use bf2stats_core::awards::{AwardCatalog, CriteriaEvaluator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bf2stats_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Award definitions, validated at startup.
    pub awards: Arc<AwardCatalog>,
    /// Evaluator built from the catalog's settings.
    pub evaluator: Arc<CriteriaEvaluator>,
}

impl AppState {
    pub fn new(pool: bf2stats_db::DbPool, config: ServerConfig, awards: AwardCatalog) -> Self {
        let evaluator = CriteriaEvaluator::new(awards.settings());
        Self {
            pool,
            config: Arc::new(config),
            awards: Arc::new(awards),
            evaluator: Arc::new(evaluator),
        }
    }
}
