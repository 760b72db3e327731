use bf2stats_core::types::Pid;
use serde::Serialize;
use sqlx::FromRow;

/// One ranked player on a leaderboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based rank within the category.
    pub position: i64,
    pub pid: Pid,
    pub name: String,
    pub score: i64,
    pub time: i64,
    pub kills: i64,
    pub rank_id: i32,
    pub country: String,
}
