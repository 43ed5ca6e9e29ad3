use chrono::{DateTime, Duration, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::modules::ticket_log::core::params::{SortColumn, SortDirection, TicketLogParams};
use crate::modules::ticket_log::core::ticket::TicketStatus;
use crate::shared::core::primitives::iso_millis;

pub const PAGE_ROWS: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equals<T> {
    #[serde(rename = "_eq")]
    pub eq: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneOf<T> {
    #[serde(rename = "_in")]
    pub values: Vec<T>,
}

/// Half-open `[gte, lt)` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    #[serde(rename = "_gte", serialize_with = "iso_millis::serialize")]
    pub gte: DateTime<Utc>,
    #[serde(rename = "_lt", serialize_with = "iso_millis::serialize")]
    pub lt: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.gte <= *instant && *instant < self.lt
    }
}

/// The `where` argument of the ticket log query and both subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketWhere {
    #[serde(rename = "accountId")]
    pub account_id: Equals<i64>,
    #[serde(rename = "locationId", skip_serializing_if = "Option::is_none")]
    pub location_id: Option<OneOf<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_status: Option<Equals<TicketStatus>>,
    #[serde(rename = "createdTime")]
    pub created_time: TimeRange,
}

impl TicketWhere {
    pub fn new(account_id: i64, params: &TicketLogParams) -> Self {
        Self {
            account_id: Equals { eq: account_id },
            location_id: (!params.locations.is_empty()).then(|| OneOf {
                values: params.locations.clone(),
            }),
            ticket_status: TicketStatus::from_code(params.status).map(|status| Equals { eq: status }),
            created_time: TimeRange {
                gte: params.start_date,
                lt: params
                    .end_date
                    .checked_add_signed(Duration::days(1))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        }
    }
}

/// A single `{column: direction}` entry of `orderBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderByClause {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Serialize for OrderByClause {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.column.as_str(), &self.direction)?;
        map.end()
    }
}

/// `createdTime`, `name`, `truckId` sharing one direction; reversed when the
/// truck column is the chosen one so it leads the sort.
pub fn order_by(sort_column: SortColumn, direction: SortDirection) -> Vec<OrderByClause> {
    let mut clauses: Vec<OrderByClause> = [SortColumn::CreatedTime, SortColumn::Name, SortColumn::TruckId]
        .into_iter()
        .map(|column| OrderByClause { column, direction })
        .collect();
    if sort_column == SortColumn::TruckId {
        clauses.reverse();
    }
    clauses
}

/// Variables of the paged query and of the rows subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketLogVariables {
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "where")]
    pub filter: TicketWhere,
    #[serde(rename = "orderBy")]
    pub order_by: Vec<OrderByClause>,
}

impl TicketLogVariables {
    pub fn for_page(current_page: i64, filter: TicketWhere, order_by: Vec<OrderByClause>) -> Self {
        Self {
            limit: PAGE_ROWS,
            offset: (current_page - 1) * PAGE_ROWS,
            filter,
            order_by,
        }
    }
}

/// Variables of the aggregate count subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateVariables {
    #[serde(rename = "where")]
    pub filter: TicketWhere,
}
