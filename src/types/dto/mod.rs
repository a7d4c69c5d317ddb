// Data transfer objects - API request/response models
pub mod common;
pub mod lists;
pub mod users;

use chrono::DateTime;

/// Render a unix-microseconds timestamp as an ISO 8601 string for DTOs.
pub fn to_rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp_micros(timestamp)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
