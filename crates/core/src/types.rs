/// All database primary keys are PostgreSQL BIGINT.
pub type DbId = i64;

/// Player identifier (`pid`) as issued by the game servers.
pub type Pid = i64;

/// Award identifier. Ribbons and badges share the same id space.
pub type AwardId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
