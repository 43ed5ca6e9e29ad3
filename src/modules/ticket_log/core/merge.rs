use crate::modules::ticket_log::core::result::{SubscriptionEvent, TicketLogResult};

/// Fold a subscription event into the cached query result. Events carrying
/// data replace their slice wholesale; events without data change nothing.
pub fn merge(previous: TicketLogResult, event: SubscriptionEvent) -> TicketLogResult {
    match event {
        SubscriptionEvent::Rows(Some(rows)) => TicketLogResult {
            local_tickets: rows.local_tickets,
            ..previous
        },
        SubscriptionEvent::Aggregate(Some(aggregate)) => TicketLogResult {
            local_ticket_aggregate: Some(aggregate.local_ticket_aggregate),
            ..previous
        },
        SubscriptionEvent::Rows(None) | SubscriptionEvent::Aggregate(None) => previous,
    }
}
