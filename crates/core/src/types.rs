/// Record identifiers are prefixed, time-stamped strings (e.g. `SUR20250101120000ab12cd34`).
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
