use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Sent,
    Saved,
    Canceled,
}

impl TicketStatus {
    /// Status codes as carried by the `sta` URL parameter.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(TicketStatus::Sent),
            2 => Some(TicketStatus::Saved),
            3 => Some(TicketStatus::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Sent => "SENT",
            TicketStatus::Saved => "SAVED",
            TicketStatus::Canceled => "CANCELED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedEntity {
    pub name: String,
    pub id: i64,
}

/// One row of the ticket log, in the backend's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub name: String,
    pub id: i64,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    #[serde(rename = "loadStartTime", default)]
    pub load_start_time: Option<DateTime<Utc>>,
    #[serde(rename = "updateAt")]
    pub update_at: DateTime<Utc>,
    pub ticket_received_time: DateTime<Utc>,
    pub ticket_status: TicketStatus,
    pub ticket_source: String,
    #[serde(default)]
    pub driver: Option<RelatedEntity>,
    #[serde(default)]
    pub location: Option<RelatedEntity>,
    #[serde(default)]
    pub plant: Option<RelatedEntity>,
}
