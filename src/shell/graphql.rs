use async_graphql::Schema;

pub use crate::modules::ticket_log::use_cases::record_ticket::inbound::graphql::MutationRoot;
pub use crate::modules::ticket_log::use_cases::view_ticket_log::inbound::graphql::{
    QueryRoot, SubscriptionRoot,
};
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(state)
        .finish()
}
