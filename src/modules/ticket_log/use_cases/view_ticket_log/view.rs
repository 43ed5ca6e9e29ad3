use serde::Serialize;

use crate::modules::ticket_log::core::filter::PAGE_ROWS;
use crate::modules::ticket_log::core::result::TicketLogResult;
use crate::modules::ticket_log::core::ticket::Ticket;

/// What the ticket log page renders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketLogView {
    pub current_page: Option<i64>,
    pub loading: bool,
    pub pagination_url: String,
    pub tickets: Vec<Ticket>,
    pub total_pages: i64,
}

impl TicketLogView {
    pub fn new(
        current_page: Option<i64>,
        loading: bool,
        pagination_url: String,
        result: Option<&TicketLogResult>,
    ) -> Self {
        Self {
            current_page,
            loading,
            pagination_url,
            tickets: result
                .map(|result| result.local_tickets.clone())
                .unwrap_or_default(),
            total_pages: total_pages(result.map(TicketLogResult::count).unwrap_or(0)),
        }
    }
}

pub fn total_pages(count: i64) -> i64 {
    let count = count.max(0);
    (count + PAGE_ROWS - 1) / PAGE_ROWS
}
