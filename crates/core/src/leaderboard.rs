//! Leaderboard categories and window arithmetic.
//!
//! A leaderboard request names a category and an optional window around a
//! position: `pos` (1-based, default 1), `before` and `after`. The window
//! starts `before` rows ahead of `pos` and spans `after + 1` rows.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::pagination::MAX_PAGE_LIMIT;

/// Ranked statistic a leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardCategory {
    /// Overall score.
    Score,
    /// Commander score.
    Commander,
    /// Teamwork score.
    Team,
    /// Skill (combat) score.
    Combat,
}

impl LeaderboardCategory {
    pub const ALL: [Self; 4] = [Self::Score, Self::Commander, Self::Team, Self::Combat];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Commander => "commander",
            Self::Team => "team",
            Self::Combat => "combat",
        }
    }

    /// `player` column ranked by this category.
    pub fn score_column(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Commander => "cmdscore",
            Self::Team => "teamscore",
            Self::Combat => "skillscore",
        }
    }

    /// `player` column reported as the time played for this category.
    pub fn time_column(self) -> &'static str {
        match self {
            Self::Commander => "cmdtime",
            _ => "time",
        }
    }
}

impl FromStr for LeaderboardCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" | "overall" => Ok(Self::Score),
            "commander" => Ok(Self::Commander),
            "team" => Ok(Self::Team),
            "combat" => Ok(Self::Combat),
            other => Err(CoreError::Validation(format!(
                "Unknown leaderboard category '{other}'"
            ))),
        }
    }
}

/// Row range of a leaderboard request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardWindow {
    /// Rows to skip.
    pub offset: i64,
    /// Rows to return, capped at [`MAX_PAGE_LIMIT`].
    pub limit: i64,
}

impl LeaderboardWindow {
    pub fn new(pos: Option<i64>, before: Option<i64>, after: Option<i64>) -> Self {
        let pos = pos.unwrap_or(1);
        let before = before.unwrap_or(0);
        let after = after.unwrap_or(0);

        let offset = pos.saturating_sub(1).saturating_sub(before).max(0);
        let limit = after.saturating_add(1).clamp(0, MAX_PAGE_LIMIT);

        Self { offset, limit }
    }

    /// Rank of the first row in the window.
    pub fn first_position(&self) -> i64 {
        self.offset.saturating_add(1)
    }
}
