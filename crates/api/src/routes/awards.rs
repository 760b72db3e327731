//! Route definitions for the `/awards` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::awards;
use crate::state::AppState;

/// Routes mounted at `/awards`.
///
/// ```text
/// GET    /   -> list_awards
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(awards::list_awards))
}
