/// Category primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Movie identifiers are caller-supplied strings.
pub type MovieId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
