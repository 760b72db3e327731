//! Route definitions for the `/battlespy` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::battlespy;
use crate::state::AppState;

/// Routes mounted at `/battlespy`.
///
/// ```text
/// GET    /reports            -> list_reports
/// GET    /reports/{id}       -> get_report
/// POST   /reports/delete     -> delete_reports    ({ "ids": [..] })
/// POST   /messages/delete    -> delete_messages   ({ "ids": [..] })
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", get(battlespy::list_reports))
        .route("/reports/{id}", get(battlespy::get_report))
        .route("/reports/delete", post(battlespy::delete_reports))
        .route("/messages/delete", post(battlespy::delete_messages))
}
