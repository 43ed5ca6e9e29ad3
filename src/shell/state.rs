use crate::shared::core::account::AccountContext;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::graphql_client::TicketLogClient;
use crate::shared::infrastructure::graphql_client::in_memory::InMemoryTicketLogClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn TicketLogClient>,
    pub recorder: Arc<InMemoryTicketLogClient>,
    pub account: AccountContext,
    pub clock: Clock,
}

impl AppState {
    /// Reads and writes both served by the in-memory backend.
    pub fn in_memory(backend: Arc<InMemoryTicketLogClient>, account: AccountContext, clock: Clock) -> Self {
        Self {
            client: backend.clone(),
            recorder: backend,
            account,
            clock,
        }
    }
}
