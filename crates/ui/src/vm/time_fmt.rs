use chrono::{DateTime, Utc};

#[must_use]
pub fn format_completed_at(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
