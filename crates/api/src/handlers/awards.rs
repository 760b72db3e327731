//! Handlers for award listing, evaluation and processing.
//!
//! Evaluation is read-only. Only `process_awards` writes, and only for
//! awards whose evaluation succeeded.

use axum::extract::{Path, State};
use axum::Json;
use bf2stats_core::awards::{AwardCriterion, AwardDefinition, AwardKind, AwardOutcome, Evaluation};
use bf2stats_core::error::CoreError;
use bf2stats_core::types::{AwardId, Pid};
use bf2stats_db::models::player_award::PlayerAward;
use bf2stats_db::repositories::PlayerAwardRepo;
use bf2stats_db::PgAwardSource;
use serde::Serialize;

use super::require_player;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Catalog entry as exposed over HTTP.
#[derive(Debug, Serialize)]
pub struct AwardSummary {
    pub id: AwardId,
    pub name: String,
    pub kind: AwardKind,
    pub criteria: Vec<AwardCriterion>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub ribbon_threshold: AwardId,
    pub awards: Vec<AwardSummary>,
}

/// Result of a single evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub pid: Pid,
    pub award_id: AwardId,
    pub kind: AwardKind,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

/// Result of processing every award for a player.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub pid: Pid,
    pub outcomes: Vec<AwardOutcome>,
    pub granted: Vec<PlayerAward>,
}

fn require_award(state: &AppState, award_id: AwardId) -> AppResult<&AwardDefinition> {
    state
        .awards
        .get(award_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Award",
            id: award_id,
        }))
}

/// GET /api/v1/awards
///
/// List the loaded award catalog in evaluation order.
pub async fn list_awards(
    State(state): State<AppState>,
) -> Json<DataResponse<CatalogResponse>> {
    let settings = state.awards.settings();
    let awards = state
        .awards
        .awards()
        .iter()
        .map(|award| AwardSummary {
            id: award.id(),
            name: award.name().to_string(),
            kind: settings.kind_of(award.id()),
            criteria: award.criteria().to_vec(),
        })
        .collect();
    Json(DataResponse {
        data: CatalogResponse {
            ribbon_threshold: settings.ribbon_threshold,
            awards,
        },
    })
}

/// POST /api/v1/players/{pid}/awards/{award_id}/evaluate
///
/// Check whether the player currently qualifies for one award. Never grants.
pub async fn evaluate_award(
    State(state): State<AppState>,
    Path((pid, award_id)): Path<(Pid, AwardId)>,
) -> AppResult<Json<DataResponse<EvaluationResponse>>> {
    let award = require_award(&state, award_id)?;
    let player = require_player(&state, pid).await?;

    let source = PgAwardSource::new(state.pool.clone());
    let evaluation = state.evaluator.evaluate(player.id, award, &source).await?;
    tracing::debug!(
        pid,
        award_id,
        qualifies = evaluation.qualifies,
        award_count = evaluation.award_count,
        "Award evaluated",
    );

    Ok(Json(DataResponse {
        data: EvaluationResponse {
            pid,
            award_id,
            kind: state.evaluator.settings().kind_of(award_id),
            evaluation,
        },
    }))
}

/// GET /api/v1/players/{pid}/awards/eligibility
///
/// Dry run: evaluate every award in the catalog without granting any.
pub async fn award_eligibility(
    State(state): State<AppState>,
    Path(pid): Path<Pid>,
) -> AppResult<Json<DataResponse<Vec<AwardOutcome>>>> {
    let player = require_player(&state, pid).await?;

    let source = PgAwardSource::new(state.pool.clone());
    let outcomes = state
        .evaluator
        .evaluate_all(player.id, &state.awards, &source)
        .await?;

    Ok(Json(DataResponse { data: outcomes }))
}

/// POST /api/v1/players/{pid}/awards/process
///
/// Evaluate every award in catalog order and grant each one the player
/// qualifies for. Each grant happens before the next award is evaluated, so
/// criteria over `player_award` see awards granted earlier in the pass.
/// A grant only lands if the award count is still the one the evaluation
/// read; an overlapping pass that got there first wins.
pub async fn process_awards(
    State(state): State<AppState>,
    Path(pid): Path<Pid>,
) -> AppResult<Json<DataResponse<ProcessResponse>>> {
    let player = require_player(&state, pid).await?;
    let source = PgAwardSource::new(state.pool.clone());
    let settings = state.evaluator.settings();

    let mut outcomes = Vec::with_capacity(state.awards.len());
    let mut granted = Vec::new();

    for award in state.awards.awards() {
        let evaluation = state.evaluator.evaluate(player.id, award, &source).await?;
        if evaluation.qualifies {
            match PlayerAwardRepo::grant(
                &state.pool,
                player.id,
                award.id(),
                evaluation.award_count,
            )
            .await?
            {
                Some(grant) => {
                    tracing::info!(pid, award_id = award.id(), level = grant.level, "Award granted");
                    granted.push(grant);
                }
                None => {
                    tracing::warn!(
                        pid,
                        award_id = award.id(),
                        award_count = evaluation.award_count,
                        "Award count changed before grant, skipping",
                    );
                }
            }
        }
        outcomes.push(AwardOutcome {
            award_id: award.id(),
            kind: settings.kind_of(award.id()),
            qualifies: evaluation.qualifies,
            award_count: evaluation.award_count,
        });
    }

    Ok(Json(DataResponse {
        data: ProcessResponse {
            pid,
            outcomes,
            granted,
        },
    }))
}
