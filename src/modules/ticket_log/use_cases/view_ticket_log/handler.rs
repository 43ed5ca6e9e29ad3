use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::modules::ticket_log::core::filter::{
    AggregateVariables, TicketLogVariables, TicketWhere, order_by,
};
use crate::modules::ticket_log::core::live_window::is_live;
use crate::modules::ticket_log::core::merge::merge;
use crate::modules::ticket_log::core::params::TicketLogParams;
use crate::modules::ticket_log::core::result::{SubscriptionEvent, TicketLogResult};
use crate::modules::ticket_log::use_cases::view_ticket_log::route::TicketLogRoute;
use crate::modules::ticket_log::use_cases::view_ticket_log::view::TicketLogView;
use crate::shared::infrastructure::graphql_client::{ClientError, Subscription, TicketLogClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Rows,
    Aggregate,
}

#[derive(Default)]
struct QueryCache {
    result: Option<TicketLogResult>,
    loading: bool,
    rows_generation: u64,
    aggregate_generation: u64,
}

impl QueryCache {
    fn generation(&self, slot: Slot) -> u64 {
        match slot {
            Slot::Rows => self.rows_generation,
            Slot::Aggregate => self.aggregate_generation,
        }
    }

    /// Invalidate whatever subscription currently feeds `slot`.
    fn retire(&mut self, slot: Slot) {
        match slot {
            Slot::Rows => self.rows_generation += 1,
            Slot::Aggregate => self.aggregate_generation += 1,
        }
    }
}

struct LiveSubscription<V> {
    variables: V,
    task: JoinHandle<()>,
}

/// Variables of the primary fetch, or `None` when the fetch is skipped.
pub fn page_variables(route: &TicketLogRoute, params: &TicketLogParams) -> Option<TicketLogVariables> {
    let account_id = route.account_id()?;
    let current_page = route.current_page()?;
    Some(TicketLogVariables::for_page(
        current_page,
        TicketWhere::new(account_id, params),
        order_by(params.sort_column, params.sort_direction),
    ))
}

/// One open ticket log page: the primary query result plus the live
/// subscriptions patching it.
///
/// Call [`render`](Self::render) whenever the route, the parameters or the
/// clock may have changed. The fetch only reruns when its variables change,
/// and each subscription is only replaced when its own inputs change.
pub struct TicketLogSession<C: ?Sized> {
    client: Arc<C>,
    cache: Arc<Mutex<QueryCache>>,
    updates: Arc<watch::Sender<u64>>,
    current_page: Option<i64>,
    pagination_url: String,
    fetched: Option<TicketLogVariables>,
    rows: Option<LiveSubscription<TicketLogVariables>>,
    aggregate: Option<LiveSubscription<AggregateVariables>>,
}

impl<C> TicketLogSession<C>
where
    C: TicketLogClient + ?Sized + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            client,
            cache: Arc::new(Mutex::new(QueryCache::default())),
            updates: Arc::new(updates),
            current_page: None,
            pagination_url: String::new(),
            fetched: None,
            rows: None,
            aggregate: None,
        }
    }

    /// Ticks every time the cached result or the loading flag changes.
    pub fn updates(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    pub fn is_subscribed(&self) -> bool {
        self.rows.is_some() || self.aggregate.is_some()
    }

    /// Primary fetch only, without live updates.
    pub async fn load(
        &mut self,
        route: &TicketLogRoute,
        params: &TicketLogParams,
    ) -> Result<TicketLogView, ClientError> {
        self.fetch(route, page_variables(route, params)).await?;
        Ok(self.view().await)
    }

    /// Primary fetch plus the rows and aggregate subscriptions while the
    /// viewed range is inside the live window.
    pub async fn render(
        &mut self,
        route: &TicketLogRoute,
        params: &TicketLogParams,
        now: DateTime<Utc>,
    ) -> Result<TicketLogView, ClientError> {
        let variables = page_variables(route, params);
        let rows_variables = variables.clone().filter(|_| is_live(now, params.end_date));
        let aggregate_variables = rows_variables.as_ref().map(|variables| AggregateVariables {
            filter: variables.filter.clone(),
        });

        if self.rows.as_ref().map(|live| &live.variables) != rows_variables.as_ref() {
            self.teardown(Slot::Rows).await;
        }
        if self.aggregate.as_ref().map(|live| &live.variables) != aggregate_variables.as_ref() {
            self.teardown(Slot::Aggregate).await;
        }

        self.fetch(route, variables).await?;

        if let Some(variables) = rows_variables.filter(|_| self.rows.is_none()) {
            let subscription = self.client.subscribe_rows(&variables).await?;
            let task = self.spawn_merge(Slot::Rows, subscription).await;
            tracing::debug!(offset = variables.offset, "rows subscription opened");
            self.rows = Some(LiveSubscription { variables, task });
        }
        if let Some(variables) = aggregate_variables.filter(|_| self.aggregate.is_none()) {
            let subscription = self.client.subscribe_aggregate(&variables).await?;
            let task = self.spawn_merge(Slot::Aggregate, subscription).await;
            tracing::debug!("aggregate subscription opened");
            self.aggregate = Some(LiveSubscription { variables, task });
        }

        Ok(self.view().await)
    }

    pub async fn view(&self) -> TicketLogView {
        let cache = self.cache.lock().await;
        TicketLogView::new(
            self.current_page,
            cache.loading,
            self.pagination_url.clone(),
            cache.result.as_ref(),
        )
    }

    async fn fetch(
        &mut self,
        route: &TicketLogRoute,
        variables: Option<TicketLogVariables>,
    ) -> Result<(), ClientError> {
        self.current_page = route.current_page();
        self.pagination_url = route.pagination_url();

        let Some(variables) = variables else {
            let mut cache = self.cache.lock().await;
            cache.result = None;
            cache.loading = false;
            self.fetched = None;
            drop(cache);
            self.notify();
            return Ok(());
        };
        if self.fetched.as_ref() == Some(&variables) {
            return Ok(());
        }

        {
            let mut cache = self.cache.lock().await;
            cache.result = None;
            cache.loading = true;
        }
        self.fetched = None;
        self.notify();

        tracing::debug!(offset = variables.offset, limit = variables.limit, "fetching ticket log page");
        let response = self.client.fetch_page(&variables).await;

        let mut cache = self.cache.lock().await;
        cache.loading = false;
        let outcome = match response {
            Ok(result) => {
                cache.result = Some(result);
                self.fetched = Some(variables);
                Ok(())
            }
            Err(error) => Err(error),
        };
        drop(cache);
        self.notify();
        outcome
    }

    async fn spawn_merge<T>(&self, slot: Slot, mut subscription: Subscription<T>) -> JoinHandle<()>
    where
        T: Send + 'static,
        SubscriptionEvent: From<Option<T>>,
    {
        let cache = self.cache.clone();
        let updates = self.updates.clone();
        let generation = cache.lock().await.generation(slot);

        tokio::spawn(async move {
            while let Some(response) = subscription.recv().await {
                for error in &response.errors {
                    tracing::warn!(?slot, message = %error.message, "subscription reported an error");
                }
                let mut cache = cache.lock().await;
                if cache.generation(slot) != generation {
                    break;
                }
                // Nothing cached means nothing to patch.
                let Some(previous) = cache.result.take() else {
                    continue;
                };
                let changed = response.data.is_some();
                cache.result = Some(merge(previous, SubscriptionEvent::from(response.data)));
                drop(cache);
                if changed {
                    updates.send_modify(|version| *version += 1);
                }
            }
        })
    }

    async fn teardown(&mut self, slot: Slot) {
        let task = match slot {
            Slot::Rows => self.rows.take().map(|live| live.task),
            Slot::Aggregate => self.aggregate.take().map(|live| live.task),
        };
        let Some(task) = task else {
            return;
        };
        self.cache.lock().await.retire(slot);
        task.abort();
        // Wait for the cancelled task so its receiver is gone before a
        // replacement subscription opens.
        let _ = task.await;
        tracing::debug!(?slot, "subscription closed");
    }

    fn notify(&self) {
        self.updates.send_modify(|version| *version += 1);
    }
}

impl<C: ?Sized> Drop for TicketLogSession<C> {
    fn drop(&mut self) {
        if let Some(live) = self.rows.take() {
            live.task.abort();
        }
        if let Some(live) = self.aggregate.take() {
            live.task.abort();
        }
    }
}
