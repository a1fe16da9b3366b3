/// Identifiers issued by the platform backend are opaque strings.
pub type AdId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
