use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};

/// Account-wide settings the ticket log needs. Passed explicitly to whoever
/// has to fall back on the account's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountContext {
    pub utc_offset: FixedOffset,
}

impl AccountContext {
    pub fn new(utc_offset: FixedOffset) -> Self {
        Self { utc_offset }
    }

    /// Local midnight of `now` in the account's offset, as a UTC instant.
    pub fn default_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_midnight = now
            .with_timezone(&self.utc_offset)
            .date_naive()
            .and_time(NaiveTime::MIN);
        let offset = Duration::seconds(i64::from(self.utc_offset.local_minus_utc()));
        Utc.from_utc_datetime(&(local_midnight - offset))
    }
}

impl Default for AccountContext {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}
