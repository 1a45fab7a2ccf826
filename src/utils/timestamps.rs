use chrono::{DateTime, Datelike, Utc};

/// Format a version timestamp relative to now.
///
/// See [`format_timestamp_at`].
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, &Utc::now())
}

/// Tiered display relative to `now`:
/// - Relative under 7 days: "just now", "5m ago", "2h ago", "3d ago"
/// - Absolute otherwise: "Jan 15" in the same year, "Dec 3, 2024" before
pub fn format_timestamp_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);

    if elapsed.num_days() < 7 {
        let seconds = elapsed.num_seconds().max(0);
        match (seconds / 86_400, seconds / 3_600, seconds / 60) {
            (days, _, _) if days > 0 => format!("{}d ago", days),
            (_, hours, _) if hours > 0 => format!("{}h ago", hours),
            (_, _, minutes) if minutes > 0 => format!("{}m ago", minutes),
            _ => "just now".to_string(),
        }
    } else if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_relative_tiers() {
        let now = now();
        assert_eq!(format_timestamp_at(&(now - Duration::seconds(30)), &now), "just now");
        assert_eq!(format_timestamp_at(&(now - Duration::minutes(45)), &now), "45m ago");
        assert_eq!(format_timestamp_at(&(now - Duration::hours(3)), &now), "3h ago");
        assert_eq!(format_timestamp_at(&(now - Duration::days(5)), &now), "5d ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let now = now();
        assert_eq!(format_timestamp_at(&(now + Duration::minutes(2)), &now), "just now");
    }

    #[test]
    fn test_absolute_same_year() {
        let now = now();
        let ts = "2024-01-15T08:00:00Z".parse().unwrap();
        assert_eq!(format_timestamp_at(&ts, &now), "Jan 15");
    }

    #[test]
    fn test_absolute_other_year() {
        let now = now();
        let ts = "2023-12-03T08:00:00Z".parse().unwrap();
        assert_eq!(format_timestamp_at(&ts, &now), "Dec 3, 2023");
    }
}
