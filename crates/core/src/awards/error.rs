//! Error types for award configuration and evaluation.
//!
//! A player not meeting an award's criteria is not an error; it is reported
//! as [`Evaluation::qualifies`](super::Evaluation) being `false`.

use crate::types::AwardId;

/// Raised while building award definitions or loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum AwardConfigError {
    #[error("invalid table name '{0}'")]
    InvalidTable(String),

    #[error("invalid field expression '{0}'")]
    InvalidField(String),

    #[error("malformed '###' placeholder in filter '{0}'")]
    MalformedPlaceholder(String),

    #[error("'###' placeholder inside a string literal in filter '{0}'")]
    PlaceholderInLiteral(String),

    #[error("aggregate field '{0}' needs a compare check")]
    AggregateNeedsCompare(String),

    #[error("forbidden token '{token}' in filter '{filter}'")]
    ForbiddenToken { token: &'static str, filter: String },

    #[error("award id must be positive (got {0})")]
    InvalidAwardId(AwardId),

    #[error("award {0} has no criteria")]
    NoCriteria(AwardId),

    #[error("duplicate award id {0}")]
    DuplicateAward(AwardId),

    #[error("ribbon threshold must be positive (got {0})")]
    InvalidRibbonThreshold(AwardId),

    #[error("failed to parse award catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read award catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Raised while evaluating an award against a player.
#[derive(Debug, thiserror::Error)]
pub enum AwardError {
    /// A criterion references a table or column that does not exist, or its
    /// filter is not valid SQL. Fatal for the evaluation.
    #[error("award configuration error: {0}")]
    Configuration(String),

    /// The underlying query failed (connectivity, timeouts, ...).
    #[error("data access error: {0}")]
    DataAccess(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AwardError {
    /// Wrap any storage error as [`AwardError::DataAccess`].
    pub fn data_access<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DataAccess(Box::new(err))
    }
}
