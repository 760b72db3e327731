use bf2stats_core::types::{DbId, Pid, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `battlespy_report` row joined with its round, server and map.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BattlespyReport {
    pub id: DbId,
    pub serverid: Option<DbId>,
    pub roundid: Option<DbId>,
    pub mapid: Option<DbId>,
    pub round_end: Option<Timestamp>,
    pub server: Option<String>,
    pub mapname: Option<String>,
    pub message_count: i64,
}

/// A `battlespy_message` row joined with the flagged player's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BattlespyMessage {
    pub id: DbId,
    pub reportid: DbId,
    pub pid: Pid,
    pub player_name: String,
    pub flag: String,
    pub severity: i32,
    pub message: String,
}

/// DTO for bulk deletes of reports or messages.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteIds {
    pub ids: Vec<DbId>,
}
