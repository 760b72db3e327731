//! PostgreSQL implementation of the award engine's data source.

use async_trait::async_trait;
use bf2stats_core::awards::{AwardDataSource, AwardError, BoundPart, CriterionLookup, CriterionRow};
use bf2stats_core::types::{AwardId, Pid};
use sqlx::PgPool;

use crate::repositories::PlayerAwardRepo;

/// SQLSTATE codes that mean the criterion itself is broken rather than the
/// database being unavailable.
const CONFIGURATION_SQLSTATES: &[&str] = &[
    "42601", // syntax_error
    "42P01", // undefined_table
    "42703", // undefined_column
    "42883", // undefined_function
    "42804", // datatype_mismatch
    "42846", // cannot_coerce
    "22P02", // invalid_text_representation
];

/// Runs award lookups against the stats database.
#[derive(Clone)]
pub struct PgAwardSource {
    pool: PgPool,
}

impl PgAwardSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build `SELECT (<field>)::float8 FROM <table> WHERE pid = $1 AND (<filter>) LIMIT 1`.
    ///
    /// The table and field are validated identifiers from the award catalog.
    /// Each award count placeholder becomes the next numbered parameter.
    fn lookup_sql(lookup: &CriterionLookup<'_>) -> String {
        let mut sql = format!(
            "SELECT ({field})::float8 AS value FROM {table} WHERE pid = $1",
            field = lookup.field,
            table = lookup.table,
        );

        if !lookup.filter.is_empty() {
            let mut bind_idx = 2u32;
            sql.push_str(" AND (");
            for part in lookup.filter.parts() {
                match part {
                    BoundPart::Sql(fragment) => sql.push_str(fragment),
                    BoundPart::AwardCount(_) => {
                        sql.push_str(&format!("${bind_idx}"));
                        bind_idx += 1;
                    }
                }
            }
            sql.push(')');
        }

        sql.push_str(" LIMIT 1");
        sql
    }
}

/// Split sqlx errors into configuration and data-access failures.
fn classify(err: sqlx::Error) -> AwardError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .is_some_and(|code| CONFIGURATION_SQLSTATES.contains(&code.as_ref())) =>
        {
            AwardError::Configuration(db_err.message().to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
            AwardError::Configuration(err.to_string())
        }
        _ => AwardError::data_access(err),
    }
}

#[async_trait]
impl AwardDataSource for PgAwardSource {
    async fn count_player_awards(&self, pid: Pid, award_id: AwardId) -> Result<i64, AwardError> {
        PlayerAwardRepo::count_for_player(&self.pool, pid, award_id)
            .await
            .map_err(AwardError::data_access)
    }

    async fn fetch_criterion_row(
        &self,
        pid: Pid,
        lookup: &CriterionLookup<'_>,
    ) -> Result<Option<CriterionRow>, AwardError> {
        tracing::debug!(
            pid,
            table = lookup.table,
            field = lookup.field,
            filter = %lookup.filter.to_literal_sql(),
            "Running award criterion lookup",
        );

        let sql = Self::lookup_sql(lookup);
        let mut query = sqlx::query_as::<_, (Option<f64>,)>(&sql).bind(pid);
        // Bind award counts in placeholder order.
        for part in lookup.filter.parts() {
            if let BoundPart::AwardCount(count) = part {
                query = query.bind(*count);
            }
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                let err = classify(err);
                if let AwardError::Configuration(msg) = &err {
                    tracing::error!(
                        table = lookup.table,
                        field = lookup.field,
                        error = %msg,
                        "Award criterion is misconfigured",
                    );
                }
                err
            })?;

        Ok(row.map(|(value,)| CriterionRow::new(value)))
    }
}
