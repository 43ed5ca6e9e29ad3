// In memory stand-in for the GraphQL backend.
//
// Purpose
// - Run the service and its tests without a remote backend.
//
// Responsibilities
// - Evaluate `where`, `orderBy`, `limit` and `offset` over stored tickets.
// - Answer a new subscription with the current snapshot, then push a fresh
//   snapshot to every open subscription whenever a ticket is recorded.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock, mpsc};

use crate::modules::ticket_log::core::filter::{
    AggregateVariables, OrderByClause, TicketLogVariables, TicketWhere,
};
use crate::modules::ticket_log::core::params::{SortColumn, SortDirection};
use crate::modules::ticket_log::core::result::{
    AggregatePayload, RowsPayload, TicketAggregate, TicketLogResult,
};
use crate::modules::ticket_log::core::ticket::Ticket;
use crate::shared::infrastructure::graphql_client::{
    ClientError, GraphQlResponse, Subscription, TicketLogClient,
};

const SUBSCRIPTION_BUFFER: usize = 16;

/// A ticket together with the columns the backend filters and sorts on but
/// does not return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTicket {
    #[serde(rename = "accountId")]
    pub account_id: i64,
    #[serde(rename = "truckId", default)]
    pub truck_id: Option<i64>,
    #[serde(flatten)]
    pub ticket: Ticket,
}

struct RowsSubscriber {
    variables: TicketLogVariables,
    sender: mpsc::Sender<GraphQlResponse<RowsPayload>>,
}

struct AggregateSubscriber {
    variables: AggregateVariables,
    sender: mpsc::Sender<GraphQlResponse<AggregatePayload>>,
}

#[derive(Default)]
pub struct InMemoryTicketLogClient {
    tickets: RwLock<Vec<StoredTicket>>,
    rows_subscribers: Mutex<Vec<RowsSubscriber>>,
    aggregate_subscribers: Mutex<Vec<AggregateSubscriber>>,
    is_offline: bool,
}

impl InMemoryTicketLogClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(tickets: Vec<StoredTicket>) -> Self {
        Self {
            tickets: RwLock::new(tickets),
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), ClientError> {
        if self.is_offline {
            return Err(ClientError::Transport("GraphQL backend offline".into()));
        }
        Ok(())
    }

    /// Store a ticket and push new snapshots to every open subscription.
    pub async fn record(&self, ticket: StoredTicket) -> Result<(), ClientError> {
        self.ensure_online()?;
        self.tickets.write().await.push(ticket);

        let tickets = self.tickets.read().await;

        let mut rows_subscribers = self.rows_subscribers.lock().await;
        rows_subscribers.retain(|subscriber| !subscriber.sender.is_closed());
        for subscriber in rows_subscribers.iter() {
            let payload = RowsPayload {
                local_tickets: page(&tickets, &subscriber.variables),
            };
            let _ = subscriber.sender.send(GraphQlResponse::data(payload)).await;
        }

        let mut aggregate_subscribers = self.aggregate_subscribers.lock().await;
        aggregate_subscribers.retain(|subscriber| !subscriber.sender.is_closed());
        for subscriber in aggregate_subscribers.iter() {
            let payload = AggregatePayload {
                local_ticket_aggregate: TicketAggregate::with_count(count(
                    &tickets,
                    &subscriber.variables.filter,
                )),
            };
            let _ = subscriber.sender.send(GraphQlResponse::data(payload)).await;
        }

        tracing::debug!(
            rows = rows_subscribers.len(),
            aggregate = aggregate_subscribers.len(),
            "ticket recorded, subscriptions notified"
        );
        Ok(())
    }

    /// Subscriptions whose receiving side is still alive.
    #[cfg(test)]
    pub(crate) async fn open_subscriptions(&self) -> usize {
        let rows = self
            .rows_subscribers
            .lock()
            .await
            .iter()
            .filter(|subscriber| !subscriber.sender.is_closed())
            .count();
        let aggregate = self
            .aggregate_subscribers
            .lock()
            .await
            .iter()
            .filter(|subscriber| !subscriber.sender.is_closed())
            .count();
        rows + aggregate
    }
}

#[async_trait::async_trait]
impl TicketLogClient for InMemoryTicketLogClient {
    async fn fetch_page(&self, variables: &TicketLogVariables) -> Result<TicketLogResult, ClientError> {
        self.ensure_online()?;
        let tickets = self.tickets.read().await;
        Ok(TicketLogResult {
            local_tickets: page(&tickets, variables),
            local_ticket_aggregate: Some(TicketAggregate::with_count(count(
                &tickets,
                &variables.filter,
            ))),
        })
    }

    async fn subscribe_rows(
        &self,
        variables: &TicketLogVariables,
    ) -> Result<Subscription<RowsPayload>, ClientError> {
        self.ensure_online()?;
        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let snapshot = RowsPayload {
            local_tickets: page(&*self.tickets.read().await, variables),
        };
        let _ = sender.send(GraphQlResponse::data(snapshot)).await;
        self.rows_subscribers.lock().await.push(RowsSubscriber {
            variables: variables.clone(),
            sender,
        });
        Ok(receiver)
    }

    async fn subscribe_aggregate(
        &self,
        variables: &AggregateVariables,
    ) -> Result<Subscription<AggregatePayload>, ClientError> {
        self.ensure_online()?;
        let (sender, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let snapshot = AggregatePayload {
            local_ticket_aggregate: TicketAggregate::with_count(count(
                &*self.tickets.read().await,
                &variables.filter,
            )),
        };
        let _ = sender.send(GraphQlResponse::data(snapshot)).await;
        self.aggregate_subscribers.lock().await.push(AggregateSubscriber {
            variables: variables.clone(),
            sender,
        });
        Ok(receiver)
    }
}

fn matches(filter: &TicketWhere, stored: &StoredTicket) -> bool {
    if stored.account_id != filter.account_id.eq {
        return false;
    }
    if let Some(locations) = &filter.location_id {
        let location_id = stored.ticket.location.as_ref().map(|location| location.id);
        if !location_id.is_some_and(|id| locations.values.contains(&id)) {
            return false;
        }
    }
    if filter
        .ticket_status
        .as_ref()
        .is_some_and(|status| stored.ticket.ticket_status != status.eq)
    {
        return false;
    }
    filter.created_time.contains(&stored.ticket.created_time)
}

fn compare(order_by: &[OrderByClause], left: &StoredTicket, right: &StoredTicket) -> Ordering {
    order_by
        .iter()
        .map(|clause| {
            let ordering = match clause.column {
                SortColumn::CreatedTime => left.ticket.created_time.cmp(&right.ticket.created_time),
                SortColumn::Name => left.ticket.name.cmp(&right.ticket.name),
                SortColumn::TruckId => left.truck_id.cmp(&right.truck_id),
            };
            match clause.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn page(tickets: &[StoredTicket], variables: &TicketLogVariables) -> Vec<Ticket> {
    let mut selected: Vec<&StoredTicket> = tickets
        .iter()
        .filter(|stored| matches(&variables.filter, stored))
        .collect();
    selected.sort_by(|left, right| compare(&variables.order_by, left, right));
    selected
        .into_iter()
        .skip(variables.offset.max(0) as usize)
        .take(variables.limit.max(0) as usize)
        .map(|stored| stored.ticket.clone())
        .collect()
}

fn count(tickets: &[StoredTicket], filter: &TicketWhere) -> i64 {
    tickets.iter().filter(|stored| matches(filter, stored)).count() as i64
}
