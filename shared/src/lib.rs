use serde::{Deserialize, Deserializer, Serialize};

// Constants shared between the browser app and the CLI
pub mod protocol;

// Management bridge types and trait
pub mod api;
pub use api::{ApiClientConfig, Credentials, ManagementBridge, ManagementError};

// Jolokia wire format
pub mod jolokia;
pub use jolokia::{ExecRequest, ExecResponse};

// Filter, sort and paging vocabulary
pub mod filter;
pub use filter::{
    Filter, FilterDescriptor, FilterField, FilterOperation, SortColumn, SortDirection, SortState,
};
pub mod paging;
pub use paging::{PageSize, PagingState};

// Broker naming and cross-view handoff
pub mod navigation;
pub use navigation::{NavTarget, Navigation, NavigationContext, WorkspaceSelection};

// Local storage encoding for the browser app
pub mod storage;
pub use storage::StoredValue;

// The sessions grid and its async driver
pub mod sessions_view;
pub use sessions_view::{
    Column, FetchOutcome, FetchRequest, FetchTicket, Notification, NotificationLevel, RowAction,
    SessionsView, ViewError, COLUMNS,
};
pub mod controller;
pub use controller::SessionsController;

/// One broker session as listed by `listSessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow {
    #[serde(deserialize_with = "display_string")]
    pub id: String,
    #[serde(rename = "connectionID", deserialize_with = "display_string")]
    pub connection_id: String,
    #[serde(default, deserialize_with = "display_string")]
    pub user: String,
    #[serde(rename = "consumerCount", default)]
    pub consumer_count: u64,
    #[serde(rename = "producerCount", default)]
    pub producer_count: u64,
    #[serde(rename = "creationTime", default, deserialize_with = "display_string")]
    pub creation_time: String,
}

/// One page of sessions plus the server-side total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPage {
    #[serde(default)]
    pub data: Vec<SessionRow>,
    pub count: u64,
}

impl SessionPage {
    /// Decode the `listSessions` return value.
    ///
    /// The broker returns the page as a JSON string; an already-decoded
    /// object is accepted too.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ManagementError> {
        match value {
            serde_json::Value::String(text) => Ok(serde_json::from_str(&text)?),
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(ManagementError::Parse(format!(
                "expected a session list, got {}",
                other
            ))),
        }
    }
}

/// Accept strings, numbers and null for display-only attributes
fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
