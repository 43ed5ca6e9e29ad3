use async_graphql::{Context, Object, Result as GqlResult, SimpleObject, Subscription};
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::modules::ticket_log::core::live_window::closes_at;
use crate::modules::ticket_log::core::params::{TicketLogParams, resolve_params};
use crate::modules::ticket_log::core::ticket::{RelatedEntity, Ticket};
use crate::modules::ticket_log::use_cases::view_ticket_log::handler::TicketLogSession;
use crate::modules::ticket_log::use_cases::view_ticket_log::route::TicketLogRoute;
use crate::modules::ticket_log::use_cases::view_ticket_log::view::TicketLogView;
use crate::shared::core::clock::Clock;
use crate::shared::core::primitives::to_iso_millis;
use crate::shared::infrastructure::graphql_client::TicketLogClient;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlRelatedEntity {
    pub name: String,
    pub id: i64,
}

impl From<RelatedEntity> for GqlRelatedEntity {
    fn from(v: RelatedEntity) -> Self {
        Self {
            name: v.name,
            id: v.id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTicket {
    pub name: String,
    pub id: i64,
    pub created_time: String,
    pub load_start_time: Option<String>,
    pub update_at: String,
    pub ticket_received_time: String,
    pub ticket_status: String,
    pub ticket_source: String,
    pub driver: Option<GqlRelatedEntity>,
    pub location: Option<GqlRelatedEntity>,
    pub plant: Option<GqlRelatedEntity>,
}

impl From<Ticket> for GqlTicket {
    fn from(v: Ticket) -> Self {
        Self {
            name: v.name,
            id: v.id,
            created_time: to_iso_millis(&v.created_time),
            load_start_time: v.load_start_time.as_ref().map(to_iso_millis),
            update_at: to_iso_millis(&v.update_at),
            ticket_received_time: to_iso_millis(&v.ticket_received_time),
            ticket_status: v.ticket_status.as_str().to_string(),
            ticket_source: v.ticket_source,
            driver: v.driver.map(Into::into),
            location: v.location.map(Into::into),
            plant: v.plant.map(Into::into),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTicketLogView {
    pub current_page: Option<i64>,
    pub loading: bool,
    pub pagination_url: String,
    pub tickets: Vec<GqlTicket>,
    pub total_pages: i64,
}

impl From<TicketLogView> for GqlTicketLogView {
    fn from(v: TicketLogView) -> Self {
        Self {
            current_page: v.current_page,
            loading: v.loading,
            pagination_url: v.pagination_url,
            tickets: v.tickets.into_iter().map(Into::into).collect(),
            total_pages: v.total_pages,
        }
    }
}

/// Missing `sd`/`ed` fall back to the account's default date, as the HTTP
/// route would after its redirect.
fn resolve(state: &AppState, query: Option<&str>) -> TicketLogParams {
    resolve_params(query, state.account.default_date(state.clock.now()))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// One page of the ticket log. `query` is the page's URL query string.
    async fn ticket_log(
        &self,
        context: &Context<'_>,
        account_id: String,
        page_number: String,
        query: Option<String>,
    ) -> GqlResult<GqlTicketLogView> {
        let state = context.data_unchecked::<AppState>();
        let route = TicketLogRoute::new(account_id, page_number);
        let params = resolve(state, query.as_deref());

        let view = TicketLogSession::new(state.client.clone())
            .load(&route, &params)
            .await?;
        Ok(view.into())
    }
}

struct LiveFeed {
    session: TicketLogSession<dyn TicketLogClient>,
    updates: tokio::sync::watch::Receiver<u64>,
    route: TicketLogRoute,
    params: TicketLogParams,
    clock: Clock,
    pending: Option<TicketLogView>,
}

impl LiveFeed {
    /// Wait for the next change, or for the live window to close.
    async fn next(&mut self) -> Option<TicketLogView> {
        if let Some(view) = self.pending.take() {
            return Some(view);
        }
        if !self.session.is_subscribed() {
            return None;
        }

        let closes = closes_at(self.params.end_date);
        let remaining = (closes - self.clock.now()).to_std().unwrap_or_default();
        let now = tokio::select! {
            changed = self.updates.changed() => {
                changed.ok()?;
                self.clock.now()
            }
            // A fixed clock never reaches the close on its own.
            _ = tokio::time::sleep(remaining) => self.clock.now().max(closes),
        };

        match self.session.render(&self.route, &self.params, now).await {
            Ok(view) => Some(view),
            Err(error) => {
                tracing::warn!(%error, "ticket log feed stopped");
                None
            }
        }
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// The page as in `ticketLog`, followed by a new value every time a live
    /// subscription patches it. Ends once the viewed range leaves the live
    /// window.
    async fn ticket_log_updates(
        &self,
        context: &Context<'_>,
        account_id: String,
        page_number: String,
        query: Option<String>,
    ) -> async_graphql::Result<BoxStream<'static, GqlTicketLogView>> {
        let state = context.data_unchecked::<AppState>();
        let route = TicketLogRoute::new(account_id, page_number);
        let params = resolve(state, query.as_deref());

        let mut session = TicketLogSession::new(state.client.clone());
        let first = session.render(&route, &params, state.clock.now()).await?;
        let feed = LiveFeed {
            updates: session.updates(),
            session,
            route,
            params,
            clock: state.clock,
            pending: Some(first),
        };

        Ok(futures::stream::unfold(feed, |mut feed| async move {
            let view = feed.next().await?;
            Some((GqlTicketLogView::from(view), feed))
        })
        .boxed())
    }
}
