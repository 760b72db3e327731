//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus `Deserialize` DTOs where the table is writable.

pub mod battlespy;
pub mod leaderboard;
pub mod player;
pub mod player_award;
