//! Repository for the `player` table.

use bf2stats_core::types::Pid;
use sqlx::PgPool;

use crate::models::player::{CreatePlayer, Player, UpdatePlayer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, country, rank_id, score, cmdscore, teamscore, skillscore, \
                       kills, deaths, time, cmdtime, joined, lastonline";

/// Provides CRUD operations for players.
pub struct PlayerRepo;

impl PlayerRepo {
    /// Insert a new player, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlayer) -> Result<Player, sqlx::Error> {
        let query = format!(
            "INSERT INTO player (id, name, country)
             VALUES ($1, $2, COALESCE($3, 'xx'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Find a player by pid.
    pub async fn find_by_id(pool: &PgPool, pid: Pid) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM player WHERE id = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(pid)
            .fetch_optional(pool)
            .await
    }

    /// List players ordered by pid.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM player ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Player>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a player. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `pid` exists.
    pub async fn update(
        pool: &PgPool,
        pid: Pid,
        input: &UpdatePlayer,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!(
            "UPDATE player SET
                name = COALESCE($2, name),
                country = COALESCE($3, country),
                rank_id = COALESCE($4, rank_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(pid)
            .bind(&input.name)
            .bind(&input.country)
            .bind(input.rank_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a player and, by cascade, all of their statistics and awards.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, pid: Pid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM player WHERE id = $1")
            .bind(pid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
