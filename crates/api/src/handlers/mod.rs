pub mod awards;
pub mod battlespy;
pub mod leaderboard;
pub mod players;

use bf2stats_core::error::CoreError;
use bf2stats_core::types::Pid;
use bf2stats_db::models::player::Player;
use bf2stats_db::repositories::PlayerRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a player or fail with 404.
pub(crate) async fn require_player(state: &AppState, pid: Pid) -> AppResult<Player> {
    PlayerRepo::find_by_id(&state.pool, pid)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id: pid,
        }))
}
