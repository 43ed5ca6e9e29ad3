use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};

use crate::modules::ticket_log::core::params::resolve_params;
use crate::modules::ticket_log::use_cases::backfill_default_dates::backfill::backfill_default_dates;
use crate::modules::ticket_log::use_cases::view_ticket_log::handler::TicketLogSession;
use crate::modules::ticket_log::use_cases::view_ticket_log::route::TicketLogRoute;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path((account_id, page_number)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let route = TicketLogRoute::new(account_id, page_number);
    let default_date = state.account.default_date(state.clock.now());

    if let Some(rewritten) = backfill_default_dates(query.as_deref(), default_date) {
        return Redirect::temporary(&format!("{}?{rewritten}", route.path())).into_response();
    }

    let params = resolve_params(query.as_deref(), default_date);
    let mut session = TicketLogSession::new(state.client.clone());
    match session.load(&route, &params).await {
        Ok(view) => Json(view).into_response(),
        Err(error) => {
            tracing::error!(%error, "ticket log fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
