// Scripted GraphQL client for session tests.
//
// Answers every fetch with a canned result, records the variables it was
// called with, and lets the test push subscription messages by hand.

use tokio::sync::{Mutex, mpsc};

use crate::modules::ticket_log::core::filter::{AggregateVariables, TicketLogVariables};
use crate::modules::ticket_log::core::result::{AggregatePayload, RowsPayload, TicketLogResult};
use crate::shared::infrastructure::graphql_client::{
    ClientError, GraphQlResponse, Subscription, TicketLogClient,
};

pub struct ScriptedTicketLogClient {
    response: Mutex<Result<TicketLogResult, ClientError>>,
    pub fetches: Mutex<Vec<TicketLogVariables>>,
    rows: Mutex<Vec<(TicketLogVariables, mpsc::Sender<GraphQlResponse<RowsPayload>>)>>,
    aggregate: Mutex<Vec<(AggregateVariables, mpsc::Sender<GraphQlResponse<AggregatePayload>>)>>,
}

impl ScriptedTicketLogClient {
    pub fn new(result: TicketLogResult) -> Self {
        Self::with_response(Ok(result))
    }

    pub fn failing(error: ClientError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<TicketLogResult, ClientError>) -> Self {
        Self {
            response: Mutex::new(response),
            fetches: Mutex::new(Vec::new()),
            rows: Mutex::new(Vec::new()),
            aggregate: Mutex::new(Vec::new()),
        }
    }

    pub async fn fetch_count(&self) -> usize {
        self.fetches.lock().await.len()
    }

    /// Variables of every rows subscription still being listened to.
    pub async fn open_rows(&self) -> Vec<TicketLogVariables> {
        self.rows
            .lock()
            .await
            .iter()
            .filter(|(_, sender)| !sender.is_closed())
            .map(|(variables, _)| variables.clone())
            .collect()
    }

    pub async fn open_aggregates(&self) -> Vec<AggregateVariables> {
        self.aggregate
            .lock()
            .await
            .iter()
            .filter(|(_, sender)| !sender.is_closed())
            .map(|(variables, _)| variables.clone())
            .collect()
    }

    pub async fn rows_subscriptions_opened(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn emit_rows(&self, response: GraphQlResponse<RowsPayload>) {
        for (_, sender) in self.rows.lock().await.iter() {
            let _ = sender.send(response.clone()).await;
        }
    }

    pub async fn emit_aggregate(&self, response: GraphQlResponse<AggregatePayload>) {
        for (_, sender) in self.aggregate.lock().await.iter() {
            let _ = sender.send(response.clone()).await;
        }
    }
}

#[async_trait::async_trait]
impl TicketLogClient for ScriptedTicketLogClient {
    async fn fetch_page(&self, variables: &TicketLogVariables) -> Result<TicketLogResult, ClientError> {
        self.fetches.lock().await.push(variables.clone());
        self.response.lock().await.clone()
    }

    async fn subscribe_rows(
        &self,
        variables: &TicketLogVariables,
    ) -> Result<Subscription<RowsPayload>, ClientError> {
        let (sender, receiver) = mpsc::channel(8);
        self.rows.lock().await.push((variables.clone(), sender));
        Ok(receiver)
    }

    async fn subscribe_aggregate(
        &self,
        variables: &AggregateVariables,
    ) -> Result<Subscription<AggregatePayload>, ClientError> {
        let (sender, receiver) = mpsc::channel(8);
        self.aggregate.lock().await.push((variables.clone(), sender));
        Ok(receiver)
    }
}
