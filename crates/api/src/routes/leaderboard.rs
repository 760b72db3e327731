//! Route definitions for the `/leaderboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::leaderboard;
use crate::state::AppState;

/// Routes mounted at `/leaderboard`.
///
/// ```text
/// GET    /{category}   -> get_leaderboard   (?pos, ?before, ?after, ?pid)
/// ```
///
/// `category` is one of `score` (alias `overall`), `commander`, `team`,
/// `combat`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{category}", get(leaderboard::get_leaderboard))
}
