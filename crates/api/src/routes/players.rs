//! Route definitions for the `/players` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{awards, players};
use crate::state::AppState;

/// Routes mounted at `/players`.
///
/// ```text
/// GET    /                                -> list_players        (?limit, ?offset)
/// POST   /                                -> create_player
/// GET    /{pid}                           -> get_player
/// PUT    /{pid}                           -> update_player
/// DELETE /{pid}                           -> delete_player
/// GET    /{pid}/awards                    -> list_player_awards
/// GET    /{pid}/awards/eligibility        -> award_eligibility   (dry-run)
/// POST   /{pid}/awards/process            -> process_awards
/// POST   /{pid}/awards/{award_id}/evaluate -> evaluate_award
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(players::list_players).post(players::create_player))
        .route(
            "/{pid}",
            get(players::get_player)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        .route("/{pid}/awards", get(players::list_player_awards))
        .route("/{pid}/awards/eligibility", get(awards::award_eligibility))
        .route("/{pid}/awards/process", post(awards::process_awards))
        .route(
            "/{pid}/awards/{award_id}/evaluate",
            post(awards::evaluate_award),
        )
}
