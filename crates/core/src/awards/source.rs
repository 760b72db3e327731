//! Storage seam for the award engine.

use async_trait::async_trait;

use super::criterion::{BoundFilter, CriterionRow};
use super::error::AwardError;
use crate::types::{AwardId, Pid};

/// A single-row criterion lookup:
/// `SELECT <field> FROM <table> WHERE pid = <pid> AND <filter> LIMIT 1`.
///
/// `table` and `field` come from validated configuration, never from
/// request input.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionLookup<'a> {
    pub table: &'a str,
    pub field: &'a str,
    pub filter: BoundFilter,
}

/// Read-only queries the evaluator needs. Implementations must not cache:
/// every call reads from the source of truth.
#[async_trait]
pub trait AwardDataSource: Send + Sync {
    /// Number of times `pid` has already been granted `award_id`.
    async fn count_player_awards(&self, pid: Pid, award_id: AwardId) -> Result<i64, AwardError>;

    /// Run a criterion lookup, returning `None` when no row matches.
    async fn fetch_criterion_row(
        &self,
        pid: Pid,
        lookup: &CriterionLookup<'_>,
    ) -> Result<Option<CriterionRow>, AwardError>;
}
