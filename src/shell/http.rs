use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::{Extension, Router, response::Html, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::ticket_log::use_cases::view_ticket_log::inbound::http as view_http;
use crate::modules::ticket_log::use_cases::view_ticket_log::route::TICKET_LOG_PATH;
use crate::shell::graphql::{AppSchema, schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = schema(state.clone());
    Router::new()
        .route(TICKET_LOG_PATH, get(view_http::handle))
        .with_state(state)
        .route("/gql", get(graphiql).post(graphql))
        .route_service("/gql/ws", GraphQLSubscription::new(schema.clone()))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint("/gql")
            .subscription_endpoint("/gql/ws")
            .finish(),
    )
}
