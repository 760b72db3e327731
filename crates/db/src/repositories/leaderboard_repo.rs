//! Leaderboard queries over the `player` table.
//!
//! Only players with a positive score in the category are ranked. Ties are
//! broken by name, descending.

use bf2stats_core::leaderboard::{LeaderboardCategory, LeaderboardWindow};
use bf2stats_core::types::Pid;
use sqlx::PgPool;

use crate::models::leaderboard::LeaderboardEntry;

/// Column list for a category; `score` and `time` are aliased per category.
fn entry_columns(category: LeaderboardCategory, table_alias: &str) -> String {
    let score = category.score_column();
    let time = category.time_column();
    format!(
        "{table_alias}.id AS pid, TRIM({table_alias}.name) AS name, \
         {table_alias}.{score} AS score, {table_alias}.{time} AS time, \
         {table_alias}.kills, {table_alias}.rank_id, UPPER({table_alias}.country) AS country"
    )
}

pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// Number of ranked players in a category.
    pub async fn count_ranked(
        pool: &PgPool,
        category: LeaderboardCategory,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM player WHERE {} > 0",
            category.score_column()
        );
        let (count,): (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
        Ok(count)
    }

    /// A window of the leaderboard with absolute positions.
    pub async fn page(
        pool: &PgPool,
        category: LeaderboardCategory,
        window: LeaderboardWindow,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let score = category.score_column();
        let columns = entry_columns(category, "p");
        let query = format!(
            "SELECT ROW_NUMBER() OVER (ORDER BY p.{score} DESC, p.name DESC) AS position, {columns} \
             FROM player p WHERE p.{score} > 0 \
             ORDER BY p.{score} DESC, p.name DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, LeaderboardEntry>(&query)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(pool)
            .await
    }

    /// A single player's position: one more than the number of players with
    /// a strictly greater score.
    pub async fn position_of(
        pool: &PgPool,
        category: LeaderboardCategory,
        pid: Pid,
    ) -> Result<Option<LeaderboardEntry>, sqlx::Error> {
        let score = category.score_column();
        let columns = entry_columns(category, "p");
        let query = format!(
            "SELECT (SELECT COUNT(*) FROM player q WHERE q.{score} > p.{score}) + 1 AS position, \
             {columns} \
             FROM player p WHERE p.id = $1"
        );
        sqlx::query_as::<_, LeaderboardEntry>(&query)
            .bind(pid)
            .fetch_optional(pool)
            .await
    }
}
