//! Domain logic for the statistics back end.
//!
//! Pure logic only: no database or HTTP dependencies. The award engine talks
//! to storage through the [`awards::AwardDataSource`] trait, implemented in
//! `bf2stats-db`.

pub mod awards;
pub mod battlespy;
pub mod error;
pub mod leaderboard;
pub mod pagination;
pub mod types;
