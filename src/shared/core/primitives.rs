use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Widest span ever added to an instant read from the URL: the day closing
/// the created-time range and the live window after it.
const URL_INSTANT_HEADROOM_HOURS: i64 = 48;

/// Interpret a raw URL value as epoch milliseconds. Instants too close to the
/// end of the representable range count as malformed.
pub fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis = raw.trim().parse::<i64>().ok()?;
    let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
    instant.checked_add_signed(Duration::hours(URL_INSTANT_HEADROOM_HOURS))?;
    Some(instant)
}

/// UTC ISO-8601 with millisecond precision, e.g. `2021-08-06T04:00:00.000Z`.
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter writing instants in the `to_iso_millis` form.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso_millis(instant))
    }
}
