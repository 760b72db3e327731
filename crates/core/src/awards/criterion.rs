//! A single award criterion: one statistics table, one field, one filter.
//!
//! The filter is a trusted SQL `WHERE` fragment loaded from configuration.
//! It may contain the `###` placeholder, which stands for the player's
//! current award count. Placeholders are never spliced into the SQL text;
//! [`FilterTemplate::bind`] turns them into bind parameters.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::AwardConfigError;

/// Token replaced by the player's current award count.
pub const AWARD_COUNT_PLACEHOLDER: &str = "###";

/// Tokens that may never appear in a filter fragment.
const FORBIDDEN_FILTER_TOKENS: &[&str] = &[";", "--", "/*", "*/"];

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

static AGGREGATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:count|sum|min|max|avg)\(\s*(\*|[A-Za-z_][A-Za-z0-9_]*)\s*\)$")
        .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Filter templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateSegment {
    Sql(String),
    AwardCount,
}

/// A parsed `WHERE` fragment with `###` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTemplate {
    source: String,
    segments: Vec<TemplateSegment>,
}

impl FilterTemplate {
    /// Parse a filter template.
    ///
    /// A `#` that is not part of an exact `###` token (for example `##` or
    /// `####`) is rejected, as are statement separators, comment markers and
    /// placeholders inside quoted string literals. A blank template adds no
    /// condition beyond the player match.
    pub fn parse(source: &str) -> Result<Self, AwardConfigError> {
        // Odd pieces sit between quotes; an escaped '' yields an empty piece
        // and keeps the parity.
        if source
            .split('\'')
            .skip(1)
            .step_by(2)
            .any(|literal| literal.contains(AWARD_COUNT_PLACEHOLDER))
        {
            return Err(AwardConfigError::PlaceholderInLiteral(source.to_string()));
        }

        for &token in FORBIDDEN_FILTER_TOKENS {
            if source.contains(token) {
                return Err(AwardConfigError::ForbiddenToken {
                    token,
                    filter: source.to_string(),
                });
            }
        }

        let mut segments = Vec::new();
        for (i, piece) in source.split(AWARD_COUNT_PLACEHOLDER).enumerate() {
            if piece.contains('#') {
                return Err(AwardConfigError::MalformedPlaceholder(source.to_string()));
            }
            if i > 0 {
                segments.push(TemplateSegment::AwardCount);
            }
            if !piece.is_empty() {
                segments.push(TemplateSegment::Sql(piece.to_string()));
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of `###` placeholders in the template.
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, TemplateSegment::AwardCount))
            .count()
    }

    /// Bind the player's current award count into every placeholder.
    pub fn bind(&self, award_count: i64) -> BoundFilter {
        let parts = self
            .segments
            .iter()
            .map(|segment| match segment {
                TemplateSegment::Sql(sql) => BoundPart::Sql(sql.clone()),
                TemplateSegment::AwardCount => BoundPart::AwardCount(award_count),
            })
            .collect();
        BoundFilter { parts }
    }
}

/// One piece of a [`BoundFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundPart {
    /// Trusted SQL text from the template.
    Sql(String),
    /// A bind parameter carrying the award count.
    AwardCount(i64),
}

/// A filter template with its award count bound, ready to be pushed into a
/// query builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundFilter {
    parts: Vec<BoundPart>,
}

impl BoundFilter {
    pub fn parts(&self) -> &[BoundPart] {
        &self.parts
    }

    /// `true` when the filter adds no condition.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| match part {
            BoundPart::Sql(sql) => sql.trim().is_empty(),
            BoundPart::AwardCount(_) => false,
        })
    }

    /// Render the filter with bind values written inline.
    ///
    /// For logging and diagnostics only; queries bind the values instead.
    pub fn to_literal_sql(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                BoundPart::Sql(sql) => sql.clone(),
                BoundPart::AwardCount(count) => count.to_string(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Comparison applied between a fetched value and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Ge => value >= threshold,
            Self::Lt => value < threshold,
            Self::Le => value <= threshold,
            Self::Eq => value == threshold,
            Self::Ne => value != threshold,
        }
    }
}

/// Threshold for a [`CriterionCheck::Compare`], possibly scaled by level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Fixed(f64),
    /// `base + step * award_count`.
    PerLevel { base: f64, step: f64 },
}

impl Threshold {
    pub fn value(&self, award_count: i64) -> f64 {
        match *self {
            Self::Fixed(v) => v,
            Self::PerLevel { base, step } => base + step * award_count as f64,
        }
    }
}

/// Predicate run against the single row a criterion lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriterionCheck {
    /// The filter does all the work; a returned row passes.
    #[default]
    RowExists,
    /// Compare the fetched field against a threshold. NULL fails.
    Compare { op: CompareOp, threshold: Threshold },
}

/// The row returned by a criterion lookup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CriterionRow {
    /// The selected field, `None` when the column is NULL.
    pub value: Option<f64>,
}

impl CriterionRow {
    pub fn new(value: Option<f64>) -> Self {
        Self { value }
    }
}

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// Configuration shape of a criterion (`where` is the filter template).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionConfig {
    pub table: String,
    pub field: String,
    #[serde(rename = "where", default)]
    pub filter: String,
    #[serde(default)]
    pub check: CriterionCheck,
}

/// A validated award criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CriterionConfig", into = "CriterionConfig")]
pub struct AwardCriterion {
    table: String,
    field: String,
    filter: FilterTemplate,
    check: CriterionCheck,
}

impl AwardCriterion {
    /// Build a criterion, validating the table name, the field expression
    /// and the filter template.
    pub fn new(
        table: impl Into<String>,
        field: impl Into<String>,
        filter: &str,
        check: CriterionCheck,
    ) -> Result<Self, AwardConfigError> {
        let table = table.into();
        if !IDENTIFIER_RE.is_match(&table) {
            return Err(AwardConfigError::InvalidTable(table));
        }

        let field = field.into().trim().to_string();
        let is_aggregate = AGGREGATE_RE.is_match(&field);
        if !IDENTIFIER_RE.is_match(&field) && !is_aggregate {
            return Err(AwardConfigError::InvalidField(field));
        }
        // An aggregate without GROUP BY always yields one row.
        if is_aggregate && check == CriterionCheck::RowExists {
            return Err(AwardConfigError::AggregateNeedsCompare(field));
        }

        let filter = FilterTemplate::parse(filter)?;

        Ok(Self {
            table,
            field,
            filter,
            check,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn filter(&self) -> &FilterTemplate {
        &self.filter
    }

    pub fn check(&self) -> CriterionCheck {
        self.check
    }

    /// Bind the award count into this criterion's filter.
    pub fn bind(&self, award_count: i64) -> BoundFilter {
        self.filter.bind(award_count)
    }

    /// Run the criterion's predicate against the fetched row.
    pub fn matches(&self, row: &CriterionRow, award_count: i64) -> bool {
        match self.check {
            CriterionCheck::RowExists => true,
            CriterionCheck::Compare { op, threshold } => match row.value {
                Some(value) => op.apply(value, threshold.value(award_count)),
                None => false,
            },
        }
    }
}

impl TryFrom<CriterionConfig> for AwardCriterion {
    type Error = AwardConfigError;

    fn try_from(config: CriterionConfig) -> Result<Self, Self::Error> {
        Self::new(config.table, config.field, &config.filter, config.check)
    }
}

impl From<AwardCriterion> for CriterionConfig {
    fn from(criterion: AwardCriterion) -> Self {
        Self {
            table: criterion.table,
            field: criterion.field,
            filter: criterion.filter.source,
            check: criterion.check,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn placeholder_substitution_renders_award_count() {
        let template = FilterTemplate::parse("kills > ###*10").unwrap();
        let bound = template.bind(3);
        assert_eq!(bound.to_literal_sql(), "kills > 3*10");
        assert_eq!(
            bound.parts(),
            &[
                BoundPart::Sql("kills > ".to_string()),
                BoundPart::AwardCount(3),
                BoundPart::Sql("*10".to_string()),
            ]
        );
    }

    #[test]
    fn template_without_placeholder_is_unchanged() {
        let template = FilterTemplate::parse("kills > 50").unwrap();
        assert_eq!(template.placeholder_count(), 0);
        assert_eq!(template.bind(7).to_literal_sql(), "kills > 50");
    }

    #[test]
    fn multiple_placeholders_are_all_bound() {
        let template = FilterTemplate::parse("kills >= ###*100 AND time >= ###*3600").unwrap();
        assert_eq!(template.placeholder_count(), 2);
        assert_eq!(
            template.bind(1).to_literal_sql(),
            "kills >= 1*100 AND time >= 1*3600"
        );
    }

    #[test]
    fn leading_placeholder_is_supported() {
        let template = FilterTemplate::parse("###*5 < score").unwrap();
        assert_eq!(template.bind(4).to_literal_sql(), "4*5 < score");
    }

    #[test]
    fn blank_template_is_empty_filter() {
        let template = FilterTemplate::parse("  ").unwrap();
        assert!(template.bind(0).is_empty());
        assert!(!FilterTemplate::parse("###").unwrap().bind(0).is_empty());
    }

    #[test]
    fn malformed_placeholders_are_rejected() {
        assert_matches!(
            FilterTemplate::parse("kills > ##*10"),
            Err(AwardConfigError::MalformedPlaceholder(_))
        );
        assert_matches!(
            FilterTemplate::parse("kills > ####*10"),
            Err(AwardConfigError::MalformedPlaceholder(_))
        );
    }

    #[test]
    fn statement_separators_and_comments_are_rejected() {
        assert_matches!(
            FilterTemplate::parse("kills > 1; DROP TABLE player"),
            Err(AwardConfigError::ForbiddenToken { token: ";", .. })
        );
        assert_matches!(
            FilterTemplate::parse("kills > 1 -- x"),
            Err(AwardConfigError::ForbiddenToken { token: "--", .. })
        );
        assert_matches!(
            FilterTemplate::parse("kills > 1 /* x */"),
            Err(AwardConfigError::ForbiddenToken { token: "/*", .. })
        );
    }

    #[test]
    fn criterion_validates_table_and_field() {
        assert_matches!(
            AwardCriterion::new("player; x", "kills", "", CriterionCheck::RowExists),
            Err(AwardConfigError::InvalidTable(_))
        );
        assert_matches!(
            AwardCriterion::new("player", "kills FROM x", "", CriterionCheck::RowExists),
            Err(AwardConfigError::InvalidField(_))
        );
        let at_least_one = CriterionCheck::Compare {
            op: CompareOp::Ge,
            threshold: Threshold::Fixed(1.0),
        };
        assert!(AwardCriterion::new("player_kit", "SUM(kills)", "", at_least_one).is_ok());
        assert!(AwardCriterion::new("player_award", "count(*)", "", at_least_one).is_ok());
    }

    #[test]
    fn aggregate_field_requires_a_compare_check() {
        assert_matches!(
            AwardCriterion::new(
                "player_army",
                "SUM(wins)",
                "time >= 7200",
                CriterionCheck::RowExists
            ),
            Err(AwardConfigError::AggregateNeedsCompare(field)) if field == "SUM(wins)"
        );
    }

    #[test]
    fn placeholder_inside_string_literal_is_rejected() {
        assert_matches!(
            FilterTemplate::parse("name = '###'"),
            Err(AwardConfigError::PlaceholderInLiteral(_))
        );
        assert_matches!(
            FilterTemplate::parse("name = 'it''s ###' AND kills > 1"),
            Err(AwardConfigError::PlaceholderInLiteral(_))
        );
        let template = FilterTemplate::parse("name <> 'x''y' AND kills > ###").unwrap();
        assert_eq!(template.placeholder_count(), 1);
    }

    #[test]
    fn compare_check_uses_level_scaled_threshold() {
        let criterion = AwardCriterion::new(
            "player",
            "kills",
            "",
            CriterionCheck::Compare {
                op: CompareOp::Gt,
                threshold: Threshold::PerLevel {
                    base: 0.0,
                    step: 100.0,
                },
            },
        )
        .unwrap();
        let row = CriterionRow::new(Some(150.0));
        assert!(criterion.matches(&row, 1));
        assert!(!criterion.matches(&row, 2));
    }

    #[test]
    fn compare_check_fails_on_null() {
        let criterion = AwardCriterion::new(
            "player",
            "kills",
            "",
            CriterionCheck::Compare {
                op: CompareOp::Ge,
                threshold: Threshold::Fixed(0.0),
            },
        )
        .unwrap();
        assert!(!criterion.matches(&CriterionRow::new(None), 0));
    }

    #[test]
    fn row_exists_check_always_passes_on_a_row() {
        let criterion =
            AwardCriterion::new("player", "kills", "kills > 50", CriterionCheck::RowExists).unwrap();
        assert!(criterion.matches(&CriterionRow::new(None), 0));
    }

    #[test]
    fn criterion_deserializes_from_config_shape() {
        let json = serde_json::json!({
            "table": "player_kit",
            "field": "kills",
            "where": "id = 6 AND kills >= ###*50",
            "check": { "kind": "compare", "op": "ge", "threshold": { "fixed": 1.0 } }
        });
        let criterion: AwardCriterion = serde_json::from_value(json).unwrap();
        assert_eq!(criterion.table(), "player_kit");
        assert_eq!(criterion.filter().as_str(), "id = 6 AND kills >= ###*50");
        assert_eq!(
            criterion.check(),
            CriterionCheck::Compare {
                op: CompareOp::Ge,
                threshold: Threshold::Fixed(1.0)
            }
        );
    }

    #[test]
    fn criterion_deserialization_surfaces_config_errors() {
        let json = serde_json::json!({
            "table": "player",
            "field": "kills",
            "where": "kills > ##"
        });
        let err = serde_json::from_value::<AwardCriterion>(json).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }
}
