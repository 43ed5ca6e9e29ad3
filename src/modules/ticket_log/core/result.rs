use serde::{Deserialize, Serialize};

use crate::modules::ticket_log::core::ticket::Ticket;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateFields {
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketAggregate {
    #[serde(default)]
    pub aggregate: Option<AggregateFields>,
}

impl TicketAggregate {
    pub fn with_count(count: i64) -> Self {
        Self {
            aggregate: Some(AggregateFields { count }),
        }
    }
}

/// Cached result of the ticket log query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketLogResult {
    #[serde(rename = "localTickets", default)]
    pub local_tickets: Vec<Ticket>,
    #[serde(rename = "localTicketAggregate", default)]
    pub local_ticket_aggregate: Option<TicketAggregate>,
}

impl TicketLogResult {
    /// Matching rows across all pages; 0 until the backend reported one.
    pub fn count(&self) -> i64 {
        self.local_ticket_aggregate
            .as_ref()
            .and_then(|aggregate| aggregate.aggregate)
            .map(|fields| fields.count)
            .unwrap_or(0)
    }
}

/// Payload of the rows subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowsPayload {
    #[serde(rename = "localTickets")]
    pub local_tickets: Vec<Ticket>,
}

/// Payload of the aggregate count subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregatePayload {
    #[serde(rename = "localTicketAggregate")]
    pub local_ticket_aggregate: TicketAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEvent {
    Rows(Option<RowsPayload>),
    Aggregate(Option<AggregatePayload>),
}

impl From<Option<RowsPayload>> for SubscriptionEvent {
    fn from(data: Option<RowsPayload>) -> Self {
        SubscriptionEvent::Rows(data)
    }
}

impl From<Option<AggregatePayload>> for SubscriptionEvent {
    fn from(data: Option<AggregatePayload>) -> Self {
        SubscriptionEvent::Aggregate(data)
    }
}
