pub const TICKET_LOG_ROOT: &str = "/ticketlog";
pub const TICKET_LOG_PATH: &str = "/ticketlog/{account_id}/{page_number}";

/// Raw path segments of `/ticketlog/{account_id}/{page_number}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLogRoute {
    pub account_id: String,
    pub page_number: String,
}

impl TicketLogRoute {
    pub fn new(account_id: impl Into<String>, page_number: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            page_number: page_number.into(),
        }
    }

    /// The page number as given; not clamped to the available pages.
    pub fn current_page(&self) -> Option<i64> {
        self.page_number.trim().parse().ok()
    }

    pub fn account_id(&self) -> Option<i64> {
        self.account_id.trim().parse().ok()
    }

    /// Base for page links; the pagination component appends the page.
    pub fn pagination_url(&self) -> String {
        format!("{TICKET_LOG_ROOT}/{}", self.account_id)
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.pagination_url(), self.page_number)
    }
}

#[cfg(test)]
mod ticket_log_route_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(1))]
    #[case("12", Some(12))]
    #[case("0", Some(0))]
    #[case("-3", Some(-3))]
    #[case("two", None)]
    #[case("", None)]
    fn it_should_pass_the_page_number_through(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(TicketLogRoute::new("1", raw).current_page(), expected);
    }

    #[rstest]
    fn it_should_build_the_pagination_url() {
        let route = TicketLogRoute::new("1", "4");
        assert_eq!(route.pagination_url(), "/ticketlog/1");
        assert_eq!(route.path(), "/ticketlog/1/4");
    }

    #[rstest]
    #[case("", None)]
    #[case("acme", None)]
    #[case("42", Some(42))]
    fn it_should_read_the_account_id(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(TicketLogRoute::new(raw, "1").account_id(), expected);
    }
}
