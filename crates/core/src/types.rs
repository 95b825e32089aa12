/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Assignment boundaries are calendar dates with no time component.
pub type Date = chrono::NaiveDate;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
