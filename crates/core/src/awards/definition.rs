use serde::{Deserialize, Serialize};

use super::criterion::AwardCriterion;
use super::error::AwardConfigError;
use crate::types::AwardId;

/// Configuration shape of an award definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardDefinitionConfig {
    pub id: AwardId,
    #[serde(default)]
    pub name: String,
    pub criteria: Vec<AwardCriterion>,
}

/// An award id plus its ordered criteria. Immutable once built.
///
/// Criteria order is significant: they are evaluated in sequence and the
/// first failure stops evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AwardDefinitionConfig", into = "AwardDefinitionConfig")]
pub struct AwardDefinition {
    id: AwardId,
    name: String,
    criteria: Vec<AwardCriterion>,
}

impl AwardDefinition {
    pub fn new(
        id: AwardId,
        name: impl Into<String>,
        criteria: Vec<AwardCriterion>,
    ) -> Result<Self, AwardConfigError> {
        if id <= 0 {
            return Err(AwardConfigError::InvalidAwardId(id));
        }
        if criteria.is_empty() {
            return Err(AwardConfigError::NoCriteria(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            criteria,
        })
    }

    pub fn id(&self) -> AwardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn criteria(&self) -> &[AwardCriterion] {
        &self.criteria
    }
}

impl TryFrom<AwardDefinitionConfig> for AwardDefinition {
    type Error = AwardConfigError;

    fn try_from(config: AwardDefinitionConfig) -> Result<Self, Self::Error> {
        Self::new(config.id, config.name, config.criteria)
    }
}

impl From<AwardDefinition> for AwardDefinitionConfig {
    fn from(award: AwardDefinition) -> Self {
        Self {
            id: award.id,
            name: award.name,
            criteria: award.criteria,
        }
    }
}
