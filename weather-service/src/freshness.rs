use chrono::{DateTime, Duration, Utc};
use common::models::DataKind;

/// Maximum age at which a cached document of `kind` is served without re-fetching.
pub fn window(kind: DataKind) -> Duration {
    match kind {
        DataKind::Current => Duration::minutes(30),
        DataKind::Forecast => Duration::minutes(60),
    }
}

/// `now - last_modified < window(kind)`. An unknown timestamp is never fresh.
pub fn is_fresh_at(
    last_modified: Option<DateTime<Utc>>,
    kind: DataKind,
    now: DateTime<Utc>,
) -> bool {
    match last_modified {
        Some(last_modified) => now - last_modified < window(kind),
        None => false,
    }
}

pub fn is_fresh(last_modified: Option<DateTime<Utc>>, kind: DataKind) -> bool {
    is_fresh_at(last_modified, kind, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_timestamp_is_stale() {
        assert!(!is_fresh(None, DataKind::Current));
        assert!(!is_fresh(None, DataKind::Forecast));
    }

    #[test]
    fn test_current_window_is_thirty_minutes() {
        let now = Utc::now();
        assert!(is_fresh_at(Some(now - Duration::minutes(10)), DataKind::Current, now));
        assert!(is_fresh_at(Some(now - Duration::minutes(29)), DataKind::Current, now));
        assert!(!is_fresh_at(Some(now - Duration::minutes(30)), DataKind::Current, now));
        assert!(!is_fresh_at(Some(now - Duration::minutes(45)), DataKind::Current, now));
    }

    #[test]
    fn test_forecast_window_is_sixty_minutes() {
        let now = Utc::now();
        assert!(is_fresh_at(Some(now - Duration::minutes(45)), DataKind::Forecast, now));
        assert!(!is_fresh_at(Some(now - Duration::minutes(60)), DataKind::Forecast, now));
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let now = Utc::now();
        assert!(is_fresh_at(Some(now + Duration::minutes(5)), DataKind::Current, now));
    }
}
