use chrono::{DateTime, Utc};

use crate::modules::ticket_log::core::url_params::{END_DATE, QueryParams, START_DATE};

/// Make sure the URL names both ends of the viewed range.
///
/// Returns the rewritten query string when `sd` and/or `ed` is missing, with
/// the missing ones set to `default_date` in epoch milliseconds. Returns
/// `None` once both are present, so applying the result again is a no-op.
pub fn backfill_default_dates(query: Option<&str>, default_date: DateTime<Utc>) -> Option<String> {
    let mut params = QueryParams::parse(query);
    let missing: Vec<&str> = [START_DATE, END_DATE]
        .into_iter()
        .filter(|key| !params.is_present(key))
        .collect();
    if missing.is_empty() {
        return None;
    }

    let millis = default_date.timestamp_millis().to_string();
    for key in missing {
        params.set(key, millis.clone());
    }
    Some(params.to_query_string())
}
