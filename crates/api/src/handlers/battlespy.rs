//! Handlers for BattleSpy reports and messages.

use axum::extract::{Path, State};
use axum::Json;
use bf2stats_core::battlespy::{severity_badge, validate_id_list};
use bf2stats_core::error::CoreError;
use bf2stats_core::types::DbId;
use bf2stats_db::models::battlespy::{BattlespyMessage, BattlespyReport, DeleteIds};
use bf2stats_db::repositories::BattlespyRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A message plus its display badge.
#[derive(Debug, Serialize)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: BattlespyMessage,
    pub badge: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportDetail {
    pub report: BattlespyReport,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted: u64,
}

/// GET /api/v1/battlespy/reports
pub async fn list_reports(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BattlespyReport>>>> {
    let reports = BattlespyRepo::list_reports(&state.pool).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/battlespy/reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportDetail>>> {
    let report = BattlespyRepo::find_report(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BattlespyReport",
            id,
        }))?;

    let messages = BattlespyRepo::list_messages(&state.pool, id)
        .await?
        .into_iter()
        .map(|message| MessageView {
            badge: severity_badge(message.severity),
            message,
        })
        .collect();

    Ok(Json(DataResponse {
        data: ReportDetail { report, messages },
    }))
}

/// POST /api/v1/battlespy/reports/delete
pub async fn delete_reports(
    State(state): State<AppState>,
    Json(input): Json<DeleteIds>,
) -> AppResult<Json<DataResponse<DeleteResult>>> {
    validate_id_list(&input.ids)?;
    let deleted = BattlespyRepo::delete_reports(&state.pool, &input.ids).await?;
    tracing::info!(requested = input.ids.len(), deleted, "BattleSpy reports deleted");
    Ok(Json(DataResponse {
        data: DeleteResult { deleted },
    }))
}

/// POST /api/v1/battlespy/messages/delete
pub async fn delete_messages(
    State(state): State<AppState>,
    Json(input): Json<DeleteIds>,
) -> AppResult<Json<DataResponse<DeleteResult>>> {
    validate_id_list(&input.ids)?;
    let deleted = BattlespyRepo::delete_messages(&state.pool, &input.ids).await?;
    tracing::info!(requested = input.ids.len(), deleted, "BattleSpy messages deleted");
    Ok(Json(DataResponse {
        data: DeleteResult { deleted },
    }))
}
