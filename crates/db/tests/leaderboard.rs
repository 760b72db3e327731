//! Database-backed leaderboard and BattleSpy tests.
//!
//! Each test gets a fresh database from `DATABASE_URL` with the migrations
//! applied.

use bf2stats_core::leaderboard::{LeaderboardCategory, LeaderboardWindow};
use bf2stats_db::repositories::{BattlespyRepo, LeaderboardRepo};
use sqlx::PgPool;

async fn seed_scores(pool: &PgPool) {
    for (pid, name, score) in [(1, "alpha", 500), (2, "bravo", 900), (3, "charlie", 0), (4, "delta", 700)] {
        sqlx::query("INSERT INTO player (id, name, country, score) VALUES ($1, $2, 'gb', $3)")
            .bind(pid as i64)
            .bind(name)
            .bind(score as i64)
            .execute(pool)
            .await
            .unwrap();
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn ranks_only_positive_scores_in_order(pool: PgPool) {
    seed_scores(&pool).await;

    let size = LeaderboardRepo::count_ranked(&pool, LeaderboardCategory::Score)
        .await
        .unwrap();
    assert_eq!(size, 3);

    let window = LeaderboardWindow::new(Some(1), None, Some(9));
    let rows = LeaderboardRepo::page(&pool, LeaderboardCategory::Score, window)
        .await
        .unwrap();
    let ranked: Vec<_> = rows.iter().map(|r| (r.position, r.pid)).collect();
    assert_eq!(ranked, [(1, 2), (2, 4), (3, 1)]);
    assert_eq!(rows[0].country, "GB");
}

#[sqlx::test(migrations = "./migrations")]
async fn window_offsets_keep_absolute_positions(pool: PgPool) {
    seed_scores(&pool).await;

    let window = LeaderboardWindow::new(Some(3), Some(1), Some(0));
    let rows = LeaderboardRepo::page(&pool, LeaderboardCategory::Score, window)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].position, 2);
    assert_eq!(rows[0].pid, 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn single_player_position(pool: PgPool) {
    seed_scores(&pool).await;

    let entry = LeaderboardRepo::position_of(&pool, LeaderboardCategory::Score, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.position, 3);

    let missing = LeaderboardRepo::position_of(&pool, LeaderboardCategory::Score, 99)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn battlespy_reports_delete_with_messages(pool: PgPool) {
    seed_scores(&pool).await;
    let (report_id,): (i64,) =
        sqlx::query_as("INSERT INTO battlespy_report (serverid, roundid) VALUES (NULL, NULL) RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query(
        "INSERT INTO battlespy_message (reportid, pid, flag, severity, message) \
         VALUES ($1, 1, 'kpm', 3, 'Kills per minute too high')",
    )
    .bind(report_id)
    .execute(&pool)
    .await
    .unwrap();

    let reports = BattlespyRepo::list_reports(&pool).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message_count, 1);

    let messages = BattlespyRepo::list_messages(&pool, report_id).await.unwrap();
    assert_eq!(messages[0].player_name, "alpha");

    let removed = BattlespyRepo::delete_reports(&pool, &[report_id, report_id + 1000])
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(BattlespyRepo::list_messages(&pool, report_id).await.unwrap().is_empty());
}
