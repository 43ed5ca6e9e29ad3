use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tower::ServiceExt;

use crate::modules::ticket_log::core::params::{TicketLogParams, resolve_params};
use crate::modules::ticket_log::core::result::{
    AggregatePayload, RowsPayload, TicketAggregate, TicketLogResult,
};
use crate::modules::ticket_log::use_cases::backfill_default_dates::backfill::backfill_default_dates;
use crate::modules::ticket_log::use_cases::view_ticket_log::handler::TicketLogSession;
use crate::modules::ticket_log::use_cases::view_ticket_log::route::TicketLogRoute;
use crate::modules::ticket_log::use_cases::view_ticket_log::view::TicketLogView;
use crate::shared::core::account::AccountContext;
use crate::shared::core::clock::Clock;
use crate::shared::infrastructure::graphql_client::GraphQlResponse;
use crate::shared::infrastructure::graphql_client::in_memory::InMemoryTicketLogClient;
use crate::shell::http::router;
use crate::shell::state::AppState;
use crate::tests::fixtures::scripted_client::ScriptedTicketLogClient;
use crate::tests::fixtures::tickets::{fixture_day, make_stored_ticket, make_ticket, make_ticket_named};

fn account() -> AccountContext {
    AccountContext::new(FixedOffset::west_opt(7 * 3600).unwrap())
}

fn account_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2021-05-04T13:35:12-07:00")
        .unwrap()
        .with_timezone(&Utc)
}

async fn wait_for(
    session: &TicketLogSession<ScriptedTicketLogClient>,
    done: impl Fn(&TicketLogView) -> bool,
) -> TicketLogView {
    let mut updates = session.updates();
    tokio::time::timeout(StdDuration::from_secs(2), async {
        loop {
            let view = session.view().await;
            if done(&view) {
                return view;
            }
            updates.changed().await.unwrap();
        }
    })
    .await
    .expect("view did not settle within two seconds")
}

#[tokio::test]
async fn backfills_missing_dates_from_the_account_default_date() {
    let rewritten = backfill_default_dates(None, account().default_date(account_now()));
    assert_eq!(
        rewritten.as_deref(),
        Some("ed=1620111600000&sd=1620111600000")
    );

    let app = router(AppState::in_memory(
        Arc::new(InMemoryTicketLogClient::new()),
        account(),
        Clock::Fixed(account_now()),
    ));
    let response = app
        .oneshot(Request::get("/ticketlog/1/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/ticketlog/1/1?ed=1620111600000&sd=1620111600000"
    );
}

#[tokio::test]
async fn renders_the_primary_fetch() {
    let client = Arc::new(ScriptedTicketLogClient::new(TicketLogResult {
        local_tickets: vec![make_ticket()],
        local_ticket_aggregate: Some(TicketAggregate::with_count(40)),
    }));
    let mut session = TicketLogSession::new(client.clone());
    let params = TicketLogParams::defaults(fixture_day());

    let view = session
        .render(&TicketLogRoute::new("1", "1"), &params, fixture_day())
        .await
        .unwrap();

    assert_eq!(view.total_pages, 2);
    assert_eq!(view.tickets.len(), 1);
    assert_eq!(view.pagination_url, "/ticketlog/1");
    assert_eq!(client.fetches.lock().await[0].offset, 0);
}

#[tokio::test]
async fn replaces_rows_and_count_from_live_updates() {
    let client = Arc::new(ScriptedTicketLogClient::new(TicketLogResult {
        local_tickets: vec![make_ticket()],
        local_ticket_aggregate: Some(TicketAggregate::with_count(40)),
    }));
    let mut session = TicketLogSession::new(client.clone());
    let params = TicketLogParams::defaults(fixture_day());
    session
        .render(&TicketLogRoute::new("1", "1"), &params, fixture_day())
        .await
        .unwrap();

    let emitted = vec![make_ticket_named(1006, "420294"), make_ticket()];
    client
        .emit_rows(GraphQlResponse::data(RowsPayload {
            local_tickets: emitted.clone(),
        }))
        .await;
    client
        .emit_aggregate(GraphQlResponse::data(AggregatePayload {
            local_ticket_aggregate: TicketAggregate::with_count(60),
        }))
        .await;

    let view = wait_for(&session, |view| view.total_pages == 3 && view.tickets.len() == 2).await;
    assert_eq!(view.tickets, emitted);
}

#[tokio::test]
async fn follows_the_redirect_and_serves_the_page() {
    let now = fixture_day() + Duration::hours(2);
    let client = InMemoryTicketLogClient::with_tickets(
        (0..45)
            .map(|n| make_stored_ticket(7, 8000 + n, Duration::minutes(n)))
            .chain([make_stored_ticket(8, 9000, Duration::minutes(5))])
            .collect(),
    );
    let app = router(AppState::in_memory(
        Arc::new(client),
        AccountContext::new(FixedOffset::west_opt(4 * 3600).unwrap()),
        Clock::Fixed(now),
    ));

    let redirect = app
        .clone()
        .oneshot(Request::get("/ticketlog/7/3?sc=tn&sdr=d").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let location = redirect.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(
        location,
        "/ticketlog/7/3?ed=1628222400000&sc=tn&sd=1628222400000&sdr=d"
    );

    let response = app
        .oneshot(Request::get(location).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["currentPage"], 3);
    assert_eq!(json["totalPages"], 3);
    assert_eq!(json["paginationUrl"], "/ticketlog/7");
    let names: Vec<_> = json["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ticket| ticket["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["8004", "8003", "8002", "8001", "8000"]);
}

#[tokio::test]
async fn resolves_every_url_param_into_the_fetch() {
    let client = Arc::new(ScriptedTicketLogClient::new(TicketLogResult::default()));
    let mut session = TicketLogSession::new(client.clone());
    let params = resolve_params(
        Some("sd=1628222400000&ed=1628222400000&sta=2&lo=3,4&sc=t&sdr=d"),
        account().default_date(account_now()),
    );

    session
        .load(&TicketLogRoute::new("1", "2"), &params)
        .await
        .unwrap();

    let fetched = serde_json::to_value(&client.fetches.lock().await[0]).unwrap();
    assert_eq!(
        fetched,
        serde_json::json!({
            "limit": 20,
            "offset": 20,
            "where": {
                "accountId": { "_eq": 1 },
                "locationId": { "_in": [3, 4] },
                "ticket_status": { "_eq": "SAVED" },
                "createdTime": {
                    "_gte": "2021-08-06T04:00:00.000Z",
                    "_lt": "2021-08-07T04:00:00.000Z"
                }
            },
            "orderBy": [
                { "truckId": "desc" },
                { "name": "desc" },
                { "createdTime": "desc" }
            ]
        })
    );
}
