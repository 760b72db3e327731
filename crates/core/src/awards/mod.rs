//! Backend award engine.
//!
//! An award (ribbon, badge or medal) is defined by an id and an ordered list
//! of criteria. [`CriteriaEvaluator`] decides whether a player qualifies by
//! running each criterion against the player's persisted statistics through
//! an [`AwardDataSource`].
//!
//! Ribbons (ids above the configured threshold) can be earned once per
//! player. Badges and medals are leveled: a criterion's filter may reference
//! the player's current award count through the `###` placeholder.

pub mod catalog;
pub mod criterion;
pub mod definition;
pub mod error;
pub mod evaluator;
pub mod source;

use serde::{Deserialize, Serialize};

use crate::types::AwardId;

pub use catalog::AwardCatalog;
pub use criterion::{
    AwardCriterion, BoundFilter, BoundPart, CompareOp, CriterionCheck, CriterionRow,
    FilterTemplate, Threshold,
};
pub use definition::AwardDefinition;
pub use error::{AwardConfigError, AwardError};
pub use evaluator::{AwardOutcome, CriteriaEvaluator, Evaluation};
pub use source::{AwardDataSource, CriterionLookup};

/// Award ids strictly above this value are ribbons.
pub const DEFAULT_RIBBON_THRESHOLD: AwardId = 3_000_000;

/// Whether an award can be earned once or repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    /// One-time award; never granted twice to the same player.
    Ribbon,
    /// Repeatable, leveled award (badges and medals).
    Badge,
}

/// Engine-wide settings handed to [`CriteriaEvaluator::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardSettings {
    pub ribbon_threshold: AwardId,
}

impl Default for AwardSettings {
    fn default() -> Self {
        Self {
            ribbon_threshold: DEFAULT_RIBBON_THRESHOLD,
        }
    }
}

impl AwardSettings {
    /// Build settings, rejecting a non-positive ribbon threshold.
    pub fn new(ribbon_threshold: AwardId) -> Result<Self, AwardConfigError> {
        if ribbon_threshold <= 0 {
            return Err(AwardConfigError::InvalidRibbonThreshold(ribbon_threshold));
        }
        Ok(Self { ribbon_threshold })
    }

    /// Classify an award id.
    pub fn kind_of(&self, award_id: AwardId) -> AwardKind {
        if award_id > self.ribbon_threshold {
            AwardKind::Ribbon
        } else {
            AwardKind::Badge
        }
    }
}
