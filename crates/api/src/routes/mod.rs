pub mod awards;
pub mod battlespy;
pub mod health;
pub mod leaderboard;
pub mod players;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /players                                         list, create
/// /players/{pid}                                   get, update, delete
/// /players/{pid}/awards                            awards held (GET)
/// /players/{pid}/awards/eligibility                dry-run evaluation of every award (GET)
/// /players/{pid}/awards/process                    evaluate and grant (POST)
/// /players/{pid}/awards/{award_id}/evaluate        evaluate one award (POST)
///
/// /awards                                          award catalog (GET)
///
/// /leaderboard/{category}                          standings (?pos, ?before, ?after, ?pid)
///
/// /battlespy/reports                               list reports (GET)
/// /battlespy/reports/{id}                          report with messages (GET)
/// /battlespy/reports/delete                        bulk delete reports (POST)
/// /battlespy/messages/delete                       bulk delete messages (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/players", players::router())
        .nest("/awards", awards::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/battlespy", battlespy::router())
}
