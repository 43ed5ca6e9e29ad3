use chrono::{DateTime, Duration, Utc};

/// How long after the viewed range's end date live updates stay open.
pub const LIVE_WINDOW_HOURS: i64 = 32;

/// First instant at which a range ending on `end_date` is no longer live.
pub fn closes_at(end_date: DateTime<Utc>) -> DateTime<Utc> {
    end_date
        .checked_add_signed(Duration::hours(LIVE_WINDOW_HOURS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn is_live(now: DateTime<Utc>, end_date: DateTime<Utc>) -> bool {
    now < closes_at(end_date)
}
