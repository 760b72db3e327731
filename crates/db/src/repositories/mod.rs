//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod battlespy_repo;
pub mod leaderboard_repo;
pub mod player_award_repo;
pub mod player_repo;

pub use battlespy_repo::BattlespyRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use player_award_repo::PlayerAwardRepo;
pub use player_repo::PlayerRepo;
