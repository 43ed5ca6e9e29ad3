pub mod shared {
    pub mod core {
        pub mod account;
        pub mod clock;
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod graphql_client;
    }
}

pub mod modules {
    pub mod ticket_log {
        pub mod core {
            pub mod filter;
            pub mod live_window;
            pub mod merge;
            pub mod params;
            pub mod result;
            pub mod ticket;
            pub mod url_params;
        }
        pub mod use_cases {
            pub mod backfill_default_dates {
                pub mod backfill;
            }
            pub mod view_ticket_log {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod route;
                pub mod view;
            }
            pub mod record_ticket {
                pub mod inbound {
                    pub mod graphql;
                }
            }
        }
    }
}

pub mod shell;
