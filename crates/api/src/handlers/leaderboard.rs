//! Handlers for the `/leaderboard` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use bf2stats_core::leaderboard::{LeaderboardCategory, LeaderboardWindow};
use bf2stats_core::types::Pid;
use bf2stats_db::models::leaderboard::LeaderboardEntry;
use bf2stats_db::repositories::LeaderboardRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for a leaderboard request.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// 1-based position the window is anchored at (default 1).
    pub pos: Option<i64>,
    /// Rows to include ahead of `pos`.
    pub before: Option<i64>,
    /// Rows to include after `pos`.
    pub after: Option<i64>,
    /// Return only this player's standing.
    pub pid: Option<Pid>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub category: LeaderboardCategory,
    /// Number of ranked players in the category.
    pub size: i64,
    /// Unix time the standings were read.
    pub asof: i64,
    pub entries: Vec<LeaderboardEntry>,
}

/// GET /api/v1/leaderboard/{category}?pos=&before=&after=&pid=
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<LeaderboardResponse>>> {
    let category: LeaderboardCategory = category.parse()?;

    let size = LeaderboardRepo::count_ranked(&state.pool, category).await?;
    let entries: Vec<LeaderboardEntry> = match params.pid {
        Some(pid) => LeaderboardRepo::position_of(&state.pool, category, pid)
            .await?
            .into_iter()
            .collect(),
        None => {
            let window = LeaderboardWindow::new(params.pos, params.before, params.after);
            LeaderboardRepo::page(&state.pool, category, window).await?
        }
    };

    Ok(Json(DataResponse {
        data: LeaderboardResponse {
            category,
            size,
            asof: chrono::Utc::now().timestamp(),
            entries,
        },
    }))
}
