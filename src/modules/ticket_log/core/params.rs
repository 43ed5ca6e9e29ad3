use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::ticket_log::core::url_params::{
    END_DATE, LOCATION, QueryParams, SORT_COLUMN, SORT_DIRECTION, START_DATE, STATUS,
};
use crate::shared::core::primitives::parse_epoch_millis;

/// Status code meaning "any status".
pub const ANY_STATUS: i64 = 4;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    #[default]
    CreatedTime,
    TruckId,
    Name,
}

impl SortColumn {
    pub fn from_url(raw: &str) -> Option<Self> {
        match raw {
            "ct" => Some(SortColumn::CreatedTime),
            "t" => Some(SortColumn::TruckId),
            "tn" => Some(SortColumn::Name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::CreatedTime => "createdTime",
            SortColumn::TruckId => "truckId",
            SortColumn::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_url(raw: &str) -> Option<Self> {
        match raw {
            "a" => Some(SortDirection::Asc),
            "d" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Filter and sort state of the ticket log, decoded from the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLogParams {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: i64,
    pub locations: Vec<i64>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
}

impl TicketLogParams {
    pub fn defaults(default_date: DateTime<Utc>) -> Self {
        Self {
            start_date: default_date,
            end_date: default_date,
            status: ANY_STATUS,
            locations: Vec::new(),
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

/// Decode the ticket log parameters from a raw query string. Anything absent
/// or malformed falls back to its default.
pub fn resolve_params(query: Option<&str>, default_date: DateTime<Utc>) -> TicketLogParams {
    let params = QueryParams::parse(query);
    let defaults = TicketLogParams::defaults(default_date);

    TicketLogParams {
        start_date: params
            .last(START_DATE)
            .and_then(parse_epoch_millis)
            .unwrap_or(defaults.start_date),
        end_date: params
            .last(END_DATE)
            .and_then(parse_epoch_millis)
            .unwrap_or(defaults.end_date),
        status: params
            .last(STATUS)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(defaults.status),
        locations: params
            .values(LOCATION)
            .flat_map(|raw| raw.split(','))
            .filter_map(|item| item.trim().parse::<i64>().ok())
            .collect(),
        sort_column: params
            .last(SORT_COLUMN)
            .and_then(SortColumn::from_url)
            .unwrap_or(defaults.sort_column),
        sort_direction: params
            .last(SORT_DIRECTION)
            .and_then(SortDirection::from_url)
            .unwrap_or(defaults.sort_direction),
    }
}
