// Raw URL query handling shared by the parameter resolver and the
// default-date backfill. Decoding never fails: a query string that cannot be
// read is treated as empty.

pub const START_DATE: &str = "sd";
pub const END_DATE: &str = "ed";
pub const LOCATION: &str = "lo";
pub const STATUS: &str = "sta";
pub const SORT_COLUMN: &str = "sc";
pub const SORT_DIRECTION: &str = "sdr";

/// Ordered key/value pairs of a query string, repeated keys preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let query = query.unwrap_or_default().trim_start_matches('?');
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default();
        Self { pairs }
    }

    /// Non-empty values for `key`, in order of appearance.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, value)| k == key && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    /// Last non-empty value for `key`.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, value)| k == key && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.last(key).is_some()
    }

    /// Replace every occurrence of `key` with a single pair.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.into()));
    }

    /// Serialize with keys sorted; pairs sharing a key keep their order.
    pub fn to_query_string(&self) -> String {
        let mut pairs = self.pairs.clone();
        pairs.sort_by(|(left, _), (right, _)| left.cmp(right));
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }
}
