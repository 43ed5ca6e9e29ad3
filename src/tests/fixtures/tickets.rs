use chrono::{DateTime, Duration, Utc};

use crate::modules::ticket_log::core::ticket::Ticket;
use crate::shared::infrastructure::graphql_client::in_memory::StoredTicket;

/// 2021-08-06T04:00:00Z, the day the fixture tickets are logged on.
pub fn fixture_day() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(1_628_222_400_000).unwrap()
}

pub fn make_ticket() -> Ticket {
    serde_json::from_value(serde_json::json!({
        "name": "420292",
        "id": 1004,
        "createdTime": "2021-08-06T18:06:09.734207+00:00",
        "loadStartTime": null,
        "updateAt": "2021-08-06T15:06:09.734207+00:00",
        "ticket_received_time": "2021-08-06T18:06:09.734207+00:00",
        "ticket_status": "SAVED",
        "ticket_source": "MANUAL",
        "driver": { "name": "Charles Sheen", "id": 4, "__typename": "vitm_driver" },
        "location": {
            "name": "Manchester By The Sea is a Long Location Name",
            "id": 3,
            "__typename": "vitm_location"
        },
        "plant": { "name": "D1", "id": 3, "__typename": "vitm_plant" },
        "__typename": "vitm_local_ticket"
    }))
    .unwrap()
}

pub fn make_ticket_named(id: i64, name: &str) -> Ticket {
    Ticket {
        id,
        name: name.to_string(),
        ..make_ticket()
    }
}

/// A saved ticket at location 3, created `offset` after `fixture_day`.
pub fn make_stored_ticket(account_id: i64, id: i64, offset: Duration) -> StoredTicket {
    let created_time = fixture_day() + offset;
    StoredTicket {
        account_id,
        truck_id: Some(id % 7),
        ticket: Ticket {
            created_time,
            update_at: created_time,
            ticket_received_time: created_time,
            ..make_ticket_named(id, &id.to_string())
        },
    }
}
