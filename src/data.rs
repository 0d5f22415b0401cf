use chrono::Utc;

pub(crate) type UtcDateTime = chrono::DateTime<Utc>;
