use bf2stats_core::types::{Pid, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `player` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: Pid,
    pub name: String,
    pub country: String,
    pub rank_id: i32,
    pub score: i64,
    pub cmdscore: i64,
    pub teamscore: i64,
    pub skillscore: i64,
    pub kills: i64,
    pub deaths: i64,
    pub time: i64,
    pub cmdtime: i64,
    pub joined: Timestamp,
    pub lastonline: Option<Timestamp>,
}

/// DTO for creating a player. Ids are issued by the game servers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayer {
    pub id: Pid,
    pub name: String,
    pub country: Option<String>,
}

/// DTO for updating a player. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlayer {
    pub name: Option<String>,
    pub country: Option<String>,
    pub rank_id: Option<i32>,
}
