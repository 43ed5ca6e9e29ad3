use async_graphql::{Context, ID, Json, Object, Result as GqlResult};

use crate::shared::infrastructure::graphql_client::in_memory::StoredTicket;
use crate::shell::state::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Store a ticket in the backend's wire shape plus `accountId` and
    /// `truckId`. Open live feeds pick it up right away.
    async fn record_ticket(
        &self,
        context: &Context<'_>,
        ticket: Json<StoredTicket>,
    ) -> GqlResult<ID> {
        let state = context.data_unchecked::<AppState>();
        let ticket = ticket.0;
        let id = ticket.ticket.id;

        state
            .recorder
            .record(ticket)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(ID(id.to_string()))
    }
}
