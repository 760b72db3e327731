//! Repository for BattleSpy reports and messages.

use bf2stats_core::types::DbId;
use sqlx::PgPool;

use crate::models::battlespy::{BattlespyMessage, BattlespyReport};

const REPORT_SELECT: &str = "SELECT r.id, r.serverid, r.roundid, rh.mapid, rh.round_end, \
         s.name AS server, mi.name AS mapname, \
         (SELECT COUNT(*) FROM battlespy_message m WHERE m.reportid = r.id) AS message_count \
     FROM battlespy_report r \
     LEFT JOIN round_history rh ON r.roundid = rh.id \
     LEFT JOIN server s ON r.serverid = s.id \
     LEFT JOIN mapinfo mi ON rh.mapid = mi.id";

pub struct BattlespyRepo;

impl BattlespyRepo {
    /// All reports, newest round first.
    pub async fn list_reports(pool: &PgPool) -> Result<Vec<BattlespyReport>, sqlx::Error> {
        let query = format!("{REPORT_SELECT} ORDER BY rh.round_end DESC NULLS LAST, r.id DESC");
        sqlx::query_as::<_, BattlespyReport>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_report(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BattlespyReport>, sqlx::Error> {
        let query = format!("{REPORT_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, BattlespyReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Messages of a report, joined with the flagged player's name.
    pub async fn list_messages(
        pool: &PgPool,
        report_id: DbId,
    ) -> Result<Vec<BattlespyMessage>, sqlx::Error> {
        sqlx::query_as::<_, BattlespyMessage>(
            "SELECT m.id, m.reportid, m.pid, p.name AS player_name, m.flag, m.severity, m.message \
             FROM battlespy_message m \
             JOIN player p ON m.pid = p.id \
             WHERE m.reportid = $1 \
             ORDER BY m.severity DESC, m.id",
        )
        .bind(report_id)
        .fetch_all(pool)
        .await
    }

    /// Delete reports (and, by cascade, their messages) in one transaction.
    ///
    /// Returns the number of reports removed.
    pub async fn delete_reports(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        Self::delete_in_tx(pool, "DELETE FROM battlespy_report WHERE id = $1", ids).await
    }

    /// Delete individual messages in one transaction.
    ///
    /// Returns the number of messages removed.
    pub async fn delete_messages(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        Self::delete_in_tx(pool, "DELETE FROM battlespy_message WHERE id = $1", ids).await
    }

    async fn delete_in_tx(pool: &PgPool, statement: &str, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut removed = 0;

        for id in ids {
            let result = sqlx::query(statement)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            removed += result.rows_affected();
        }

        tx.commit().await?;
        Ok(removed)
    }
}
