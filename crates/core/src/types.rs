/// Store-assigned record identifiers (medications, associations).
pub type RecordId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
