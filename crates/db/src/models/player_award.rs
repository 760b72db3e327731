use bf2stats_core::types::{AwardId, DbId, Pid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `player_award` table: one grant of one award.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerAward {
    pub row_id: DbId,
    pub award_id: AwardId,
    pub pid: Pid,
    /// 1 for the first grant, incremented on every re-award of a badge.
    pub level: i32,
    pub earned: Timestamp,
}
