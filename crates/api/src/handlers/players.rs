//! Handlers for the `/players` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bf2stats_core::error::CoreError;
use bf2stats_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use bf2stats_core::types::Pid;
use bf2stats_db::models::player::{CreatePlayer, Player, UpdatePlayer};
use bf2stats_db::models::player_award::PlayerAward;
use bf2stats_db::repositories::{PlayerAwardRepo, PlayerRepo};

use super::require_player;
use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum player name length accepted by the game servers.
const MAX_PLAYER_NAME_LENGTH: usize = 32;

fn validate_name(name: &str) -> AppResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_PLAYER_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "name must be at most {MAX_PLAYER_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// GET /api/v1/players?limit=&offset=
pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Player>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let players = PlayerRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: players }))
}

/// GET /api/v1/players/{pid}
pub async fn get_player(
    State(state): State<AppState>,
    Path(pid): Path<Pid>,
) -> AppResult<Json<DataResponse<Player>>> {
    let player = require_player(&state, pid).await?;
    Ok(Json(DataResponse { data: player }))
}

/// POST /api/v1/players
///
/// Returns the created player with HTTP 201; 409 if the pid is taken.
pub async fn create_player(
    State(state): State<AppState>,
    Json(input): Json<CreatePlayer>,
) -> AppResult<(StatusCode, Json<DataResponse<Player>>)> {
    if input.id <= 0 {
        return Err(AppError::BadRequest("id must be positive".to_string()));
    }
    validate_name(&input.name)?;

    let player = PlayerRepo::create(&state.pool, &input).await?;
    tracing::info!(pid = player.id, "Player created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: player })))
}

/// PUT /api/v1/players/{pid}
pub async fn update_player(
    State(state): State<AppState>,
    Path(pid): Path<Pid>,
    Json(input): Json<UpdatePlayer>,
) -> AppResult<Json<DataResponse<Player>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let player = PlayerRepo::update(&state.pool, pid, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id: pid,
        }))?;
    Ok(Json(DataResponse { data: player }))
}

/// DELETE /api/v1/players/{pid}
///
/// Removes the player with all statistics and awards. 204 on success.
pub async fn delete_player(
    State(state): State<AppState>,
    Path(pid): Path<Pid>,
) -> AppResult<StatusCode> {
    if PlayerRepo::delete(&state.pool, pid).await? {
        tracing::info!(pid, "Player deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id: pid,
        }))
    }
}

/// GET /api/v1/players/{pid}/awards
pub async fn list_player_awards(
    State(state): State<AppState>,
    Path(pid): Path<Pid>,
) -> AppResult<Json<DataResponse<Vec<PlayerAward>>>> {
    require_player(&state, pid).await?;
    let awards = PlayerAwardRepo::list_for_player(&state.pool, pid).await?;
    Ok(Json(DataResponse { data: awards }))
}
