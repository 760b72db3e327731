//! Criteria evaluator: decides whether a player qualifies for an award.
//!
//! Each evaluation is a linear pipeline:
//!
//! ```text
//! Start -> CountFetched -> RibbonCheck -> Criterion[0] -> ... -> Criterion[n-1] -> Pass
//!                              |               |                       |
//!                              +-------------> Fail <-------------------+
//! ```
//!
//! The evaluator never writes. Granting an award is the caller's job.

use serde::Serialize;

use super::catalog::AwardCatalog;
use super::definition::AwardDefinition;
use super::error::AwardError;
use super::source::{AwardDataSource, CriterionLookup};
use super::{AwardKind, AwardSettings};
use crate::types::{AwardId, Pid};

/// Verdict of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub qualifies: bool,
    /// Times the player already holds the award, read before the checks.
    pub award_count: i64,
}

impl Evaluation {
    fn not_met(award_count: i64) -> Self {
        Self {
            qualifies: false,
            award_count,
        }
    }
}

/// Per-award result of [`CriteriaEvaluator::evaluate_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AwardOutcome {
    pub award_id: AwardId,
    pub kind: AwardKind,
    pub qualifies: bool,
    pub award_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CriteriaEvaluator {
    settings: AwardSettings,
}

impl CriteriaEvaluator {
    pub fn new(settings: AwardSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> AwardSettings {
        self.settings
    }

    /// Evaluate `award` for player `pid`.
    ///
    /// The award count is always read first. A ribbon the player already
    /// holds fails without touching any criterion. Otherwise criteria run in
    /// definition order and the first missing row or failed check ends the
    /// evaluation.
    pub async fn evaluate<S>(
        &self,
        pid: Pid,
        award: &AwardDefinition,
        source: &S,
    ) -> Result<Evaluation, AwardError>
    where
        S: AwardDataSource + ?Sized,
    {
        let award_count = source.count_player_awards(pid, award.id()).await?;

        if self.settings.kind_of(award.id()) == AwardKind::Ribbon && award_count > 0 {
            return Ok(Evaluation::not_met(award_count));
        }

        for criterion in award.criteria() {
            let lookup = CriterionLookup {
                table: criterion.table(),
                field: criterion.field(),
                filter: criterion.bind(award_count),
            };

            let Some(row) = source.fetch_criterion_row(pid, &lookup).await? else {
                return Ok(Evaluation::not_met(award_count));
            };

            if !criterion.matches(&row, award_count) {
                return Ok(Evaluation::not_met(award_count));
            }
        }

        Ok(Evaluation {
            qualifies: true,
            award_count,
        })
    }

    /// Evaluate every award in `catalog` for `pid`, in catalog order.
    ///
    /// Stops at the first error.
    pub async fn evaluate_all<S>(
        &self,
        pid: Pid,
        catalog: &AwardCatalog,
        source: &S,
    ) -> Result<Vec<AwardOutcome>, AwardError>
    where
        S: AwardDataSource + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(catalog.len());
        for award in catalog.awards() {
            let evaluation = self.evaluate(pid, award, source).await?;
            outcomes.push(AwardOutcome {
                award_id: award.id(),
                kind: self.settings.kind_of(award.id()),
                qualifies: evaluation.qualifies,
                award_count: evaluation.award_count,
            });
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::awards::criterion::{
        AwardCriterion, CompareOp, CriterionCheck, CriterionRow, Threshold,
    };

    const PID: Pid = 1001;

    /// In-memory source: one optional row per table, plus a call log.
    #[derive(Default)]
    struct FakeSource {
        award_counts: HashMap<AwardId, i64>,
        rows: HashMap<&'static str, CriterionRow>,
        failing_tables: Vec<&'static str>,
        count_calls: Mutex<usize>,
        lookups: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with_count(mut self, award_id: AwardId, count: i64) -> Self {
            self.award_counts.insert(award_id, count);
            self
        }

        fn with_row(mut self, table: &'static str, value: f64) -> Self {
            self.rows.insert(table, CriterionRow::new(Some(value)));
            self
        }

        fn failing_on(mut self, table: &'static str) -> Self {
            self.failing_tables.push(table);
            self
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[async_trait]
    impl AwardDataSource for FakeSource {
        async fn count_player_awards(
            &self,
            pid: Pid,
            award_id: AwardId,
        ) -> Result<i64, AwardError> {
            assert_eq!(pid, PID);
            *self.count_calls.lock().unwrap() += 1;
            Ok(self.award_counts.get(&award_id).copied().unwrap_or(0))
        }

        async fn fetch_criterion_row(
            &self,
            pid: Pid,
            lookup: &CriterionLookup<'_>,
        ) -> Result<Option<CriterionRow>, AwardError> {
            assert_eq!(pid, PID);
            self.lookups.lock().unwrap().push(format!(
                "{}.{}: {}",
                lookup.table,
                lookup.field,
                lookup.filter.to_literal_sql()
            ));
            if self.failing_tables.iter().any(|t| *t == lookup.table) {
                return Err(AwardError::data_access(Boom));
            }
            Ok(self.rows.get(lookup.table).copied())
        }
    }

    fn criterion(table: &str, filter: &str, check: CriterionCheck) -> AwardCriterion {
        AwardCriterion::new(table, "kills", filter, check).unwrap()
    }

    fn kills_greater_than(threshold: Threshold) -> CriterionCheck {
        CriterionCheck::Compare {
            op: CompareOp::Gt,
            threshold,
        }
    }

    fn evaluator() -> CriteriaEvaluator {
        CriteriaEvaluator::new(AwardSettings::default())
    }

    #[tokio::test]
    async fn ribbon_not_yet_held_passes() {
        // A ribbon with a single passing criterion.
        let award = AwardDefinition::new(
            3_000_001,
            "ribbon",
            vec![criterion(
                "player",
                "kills > 50",
                kills_greater_than(Threshold::Fixed(50.0)),
            )],
        )
        .unwrap();
        let source = FakeSource::default().with_row("player", 60.0);

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert_eq!(
            result,
            Evaluation {
                qualifies: true,
                award_count: 0
            }
        );
    }

    #[tokio::test]
    async fn held_ribbon_short_circuits_before_criteria() {
        let award = AwardDefinition::new(
            3_000_001,
            "ribbon",
            vec![criterion("player", "kills > 50", CriterionCheck::RowExists)],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_count(3_000_001, 1)
            .with_row("player", 60.0);

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert_eq!(
            result,
            Evaluation {
                qualifies: false,
                award_count: 1
            }
        );
        assert!(source.lookups().is_empty());
        assert_eq!(*source.count_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn held_badge_is_still_evaluated() {
        let award = AwardDefinition::new(
            3_000_000,
            "badge at threshold",
            vec![criterion("player", "kills > ###", CriterionCheck::RowExists)],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_count(3_000_000, 5)
            .with_row("player", 60.0);

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert!(result.qualifies);
        assert_eq!(result.award_count, 5);
        assert_eq!(source.lookups(), ["player.kills: kills > 5"]);
    }

    #[tokio::test]
    async fn leveled_badge_threshold_scales_with_award_count() {
        let award = AwardDefinition::new(
            42,
            "badge",
            vec![criterion(
                "player",
                "kills > ###*100",
                kills_greater_than(Threshold::PerLevel {
                    base: 0.0,
                    step: 100.0,
                }),
            )],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_count(42, 2)
            .with_row("player", 150.0);

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert_eq!(
            result,
            Evaluation {
                qualifies: false,
                award_count: 2
            }
        );
        assert_eq!(source.lookups(), ["player.kills: kills > 2*100"]);
    }

    #[tokio::test]
    async fn missing_row_fails_without_running_the_check() {
        // A compare check would pass on any value; the absent row must win.
        let award = AwardDefinition::new(
            42,
            "badge",
            vec![criterion(
                "player_kit",
                "id = 6",
                CriterionCheck::Compare {
                    op: CompareOp::Ge,
                    threshold: Threshold::Fixed(f64::NEG_INFINITY),
                },
            )],
        )
        .unwrap();
        let source = FakeSource::default().with_count(42, 3);

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert_eq!(
            result,
            Evaluation {
                qualifies: false,
                award_count: 3
            }
        );
        assert_eq!(source.lookups().len(), 1);
    }

    #[tokio::test]
    async fn first_failure_stops_later_criteria() {
        let award = AwardDefinition::new(
            42,
            "badge",
            vec![
                criterion("player", "kills > 1000", kills_greater_than(Threshold::Fixed(1000.0))),
                criterion("exploding", "kills > 0", CriterionCheck::RowExists),
            ],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_row("player", 10.0)
            .with_row("exploding", 10.0)
            .failing_on("exploding");

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert!(!result.qualifies);
        assert_eq!(source.lookups(), ["player.kills: kills > 1000"]);
    }

    #[tokio::test]
    async fn all_criteria_run_in_order_when_passing() {
        let award = AwardDefinition::new(
            42,
            "badge",
            vec![
                criterion("player", "kills > 1", CriterionCheck::RowExists),
                criterion("player_kit", "kills > 2", CriterionCheck::RowExists),
                criterion("player_weapon", "kills > 3", CriterionCheck::RowExists),
            ],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_row("player", 10.0)
            .with_row("player_kit", 10.0)
            .with_row("player_weapon", 10.0);

        let result = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert!(result.qualifies);
        assert_eq!(
            source.lookups(),
            [
                "player.kills: kills > 1",
                "player_kit.kills: kills > 2",
                "player_weapon.kills: kills > 3",
            ]
        );
    }

    #[tokio::test]
    async fn data_access_errors_propagate() {
        let award = AwardDefinition::new(
            42,
            "badge",
            vec![criterion("exploding", "kills > 0", CriterionCheck::RowExists)],
        )
        .unwrap();
        let source = FakeSource::default().failing_on("exploding");

        let result = evaluator().evaluate(PID, &award, &source).await;

        assert_matches!(result, Err(AwardError::DataAccess(_)));
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let award = AwardDefinition::new(
            42,
            "badge",
            vec![criterion("player", "kills > ###*10", CriterionCheck::RowExists)],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_count(42, 3)
            .with_row("player", 60.0);

        let first = evaluator().evaluate(PID, &award, &source).await.unwrap();
        let second = evaluator().evaluate(PID, &award, &source).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            source.lookups(),
            ["player.kills: kills > 3*10", "player.kills: kills > 3*10"]
        );
    }

    #[tokio::test]
    async fn evaluate_all_reports_every_award_in_order() {
        let catalog = AwardCatalog::new(
            AwardSettings::default(),
            vec![
                AwardDefinition::new(
                    3_000_001,
                    "ribbon",
                    vec![criterion("player", "kills > 50", CriterionCheck::RowExists)],
                )
                .unwrap(),
                AwardDefinition::new(
                    42,
                    "badge",
                    vec![criterion("player_kit", "kills > 0", CriterionCheck::RowExists)],
                )
                .unwrap(),
            ],
        )
        .unwrap();
        let source = FakeSource::default()
            .with_count(42, 1)
            .with_row("player", 60.0);

        let outcomes = evaluator()
            .evaluate_all(PID, &catalog, &source)
            .await
            .unwrap();

        assert_eq!(
            outcomes,
            [
                AwardOutcome {
                    award_id: 3_000_001,
                    kind: AwardKind::Ribbon,
                    qualifies: true,
                    award_count: 0,
                },
                AwardOutcome {
                    award_id: 42,
                    kind: AwardKind::Badge,
                    qualifies: false,
                    award_count: 1,
                },
            ]
        );
    }
}
