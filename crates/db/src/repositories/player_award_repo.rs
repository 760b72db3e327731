//! Repository for the `player_award` table.

use bf2stats_core::types::{AwardId, Pid};
use sqlx::PgPool;

use crate::models::player_award::PlayerAward;

const COLUMNS: &str = "row_id, id AS award_id, pid, level, earned";

/// Reads and records award grants.
pub struct PlayerAwardRepo;

impl PlayerAwardRepo {
    /// Number of times `pid` holds `award_id`.
    pub async fn count_for_player(
        pool: &PgPool,
        pid: Pid,
        award_id: AwardId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM player_award WHERE pid = $1 AND id = $2")
                .bind(pid)
                .bind(award_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// All grants for a player, oldest first.
    pub async fn list_for_player(pool: &PgPool, pid: Pid) -> Result<Vec<PlayerAward>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM player_award WHERE pid = $1 ORDER BY earned, row_id"
        );
        sqlx::query_as::<_, PlayerAward>(&query)
            .bind(pid)
            .fetch_all(pool)
            .await
    }

    /// Record a grant of `award_id` to `pid`, provided the player still holds
    /// it exactly `expected_count` times.
    ///
    /// The player row is locked with `FOR UPDATE` for the duration of the
    /// grant, so overlapping grants for one player run one after the other
    /// and the second sees the first's row. Returns `None` when the count has
    /// moved since the evaluation (or the player does not exist); a ribbon
    /// evaluated at count 0 can therefore only ever be inserted once.
    pub async fn grant(
        pool: &PgPool,
        pid: Pid,
        award_id: AwardId,
        expected_count: i64,
    ) -> Result<Option<PlayerAward>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(Pid,)> =
            sqlx::query_as("SELECT id FROM player WHERE id = $1 FOR UPDATE")
                .bind(pid)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO player_award (id, pid, level)
             SELECT $2, $1, (COUNT(*) + 1)::int
             FROM player_award WHERE pid = $1 AND id = $2
             HAVING COUNT(*) = $3
             RETURNING {COLUMNS}"
        );
        let granted = sqlx::query_as::<_, PlayerAward>(&query)
            .bind(pid)
            .bind(award_id)
            .bind(expected_count)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(granted)
    }
}
