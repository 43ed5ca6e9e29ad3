// Port to the GraphQL backend serving ticket data.
//
// The client owns transport, retries and the wire protocol. The ticket log
// only describes the requests it needs and receives typed responses.
// Subscriptions are push channels: dropping the receiver ends the
// subscription on the client side.

pub mod in_memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::modules::ticket_log::core::filter::{AggregateVariables, TicketLogVariables};
use crate::modules::ticket_log::core::result::{AggregatePayload, RowsPayload, TicketLogResult};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("graphql error: {0}")]
    Graphql(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphQlError {
    pub message: String,
}

/// One message on a subscription, shaped like a GraphQL response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![GraphQlError {
                message: message.into(),
            }],
        }
    }
}

pub type Subscription<T> = mpsc::Receiver<GraphQlResponse<T>>;

#[async_trait]
pub trait TicketLogClient: Send + Sync {
    async fn fetch_page(&self, variables: &TicketLogVariables) -> Result<TicketLogResult, ClientError>;

    async fn subscribe_rows(
        &self,
        variables: &TicketLogVariables,
    ) -> Result<Subscription<RowsPayload>, ClientError>;

    async fn subscribe_aggregate(
        &self,
        variables: &AggregateVariables,
    ) -> Result<Subscription<AggregatePayload>, ClientError>;
}
