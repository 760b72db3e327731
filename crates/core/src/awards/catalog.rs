//! The award catalog: every award definition known to the process.
//!
//! Loaded once at startup from a JSON document and validated as a whole:
//!
//! ```json
//! {
//!   "ribbon_threshold": 3000000,
//!   "awards": [
//!     {
//!       "id": 3000001,
//!       "name": "Combat Action Ribbon",
//!       "criteria": [
//!         { "table": "player_kit", "field": "kills", "where": "id = 0 AND kills > 50" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::definition::AwardDefinition;
use super::error::AwardConfigError;
use super::{AwardSettings, DEFAULT_RIBBON_THRESHOLD};
use crate::types::AwardId;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default = "default_ribbon_threshold")]
    ribbon_threshold: AwardId,
    awards: Vec<AwardDefinition>,
}

fn default_ribbon_threshold() -> AwardId {
    DEFAULT_RIBBON_THRESHOLD
}

/// Validated, read-only set of award definitions in configuration order.
#[derive(Debug, Clone)]
pub struct AwardCatalog {
    settings: AwardSettings,
    awards: Vec<AwardDefinition>,
    by_id: HashMap<AwardId, usize>,
}

impl AwardCatalog {
    /// Build a catalog, rejecting duplicate award ids.
    pub fn new(
        settings: AwardSettings,
        awards: Vec<AwardDefinition>,
    ) -> Result<Self, AwardConfigError> {
        let mut by_id = HashMap::with_capacity(awards.len());
        for (index, award) in awards.iter().enumerate() {
            if by_id.insert(award.id(), index).is_some() {
                return Err(AwardConfigError::DuplicateAward(award.id()));
            }
        }
        Ok(Self {
            settings,
            awards,
            by_id,
        })
    }

    /// Parse and validate a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, AwardConfigError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let settings = AwardSettings::new(document.ribbon_threshold)?;
        Self::new(settings, document.awards)
    }

    /// Read a catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AwardConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AwardConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn settings(&self) -> AwardSettings {
        self.settings
    }

    pub fn get(&self, award_id: AwardId) -> Option<&AwardDefinition> {
        self.by_id.get(&award_id).map(|&index| &self.awards[index])
    }

    pub fn awards(&self) -> &[AwardDefinition] {
        &self.awards
    }

    pub fn len(&self) -> usize {
        self.awards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.awards.is_empty()
    }
}
