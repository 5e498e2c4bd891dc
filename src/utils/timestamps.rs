use chrono::{DateTime, Datelike, Utc};

/// Format a history timestamp relative to now:
/// - Relative for <7 days: "2h ago", "3d ago"
/// - Absolute for ≥7 days: "Jan 15", "Dec 3, 2024"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, &Utc::now())
}

/// Same as [`format_timestamp`] with an explicit "now"
pub fn format_timestamp_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);

    // Clock skew can put entries slightly in the future
    if elapsed.num_seconds() < 60 {
        return "just now".to_string();
    }

    if elapsed.num_days() < 7 {
        if elapsed.num_days() > 0 {
            format!("{}d ago", elapsed.num_days())
        } else if elapsed.num_hours() > 0 {
            format!("{}h ago", elapsed.num_hours())
        } else {
            format!("{}m ago", elapsed.num_minutes())
        }
    } else if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}
