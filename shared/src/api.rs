//! Management bridge types and trait definitions
//!
//! This module defines the contract for invoking broker MBean operations.
//! It is implemented by both the native (reqwest) and WASM (gloo-net)
//! Jolokia clients.

use serde::{Deserialize, Serialize};

use crate::jolokia::ExecRequest;

/// Errors raised while talking to the management bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ManagementError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP layer returned an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The bridge answered, but the MBean operation failed
    #[error("Management error ({status}) {error_type}: {message}")]
    Bridge {
        status: u16,
        error_type: String,
        message: String,
    },

    /// Failed to decode a response or payload
    #[error("Parse error: {0}")]
    Parse(String),

    /// Authentication required or failed
    #[error("Auth error: {0}")]
    Auth(String),

    /// The workspace selection does not name a broker
    #[error("No broker selected (folder path: {0:?})")]
    NoBrokerSelected(Vec<String>),
}

impl From<serde_json::Error> for ManagementError {
    fn from(err: serde_json::Error) -> Self {
        ManagementError::Parse(err.to_string())
    }
}

/// Bridge endpoint paths
pub mod endpoints {
    /// Jolokia agent path on the broker's web console
    pub const JOLOKIA: &str = "/console/jolokia";
}

/// A request/response channel to broker MBeans.
///
/// Implementations resolve to the operation's return value on success.
/// Status codes carried inside the bridge reply are already checked.
#[allow(async_fn_in_trait)]
pub trait ManagementBridge {
    /// Execute an MBean operation
    async fn exec(&self, request: &ExecRequest) -> Result<serde_json::Value, ManagementError>;
}

/// Configuration for creating a bridge client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Full Jolokia URL (e.g., "http://localhost:8161/console/jolokia")
    pub base_url: String,
    /// Optional HTTP basic credentials
    pub credentials: Option<Credentials>,
}

/// HTTP basic credentials for the management console
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// URL that exec requests are POSTed to. A trailing slash is dropped.
    pub fn exec_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ManagementError::Server {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (503): unavailable");

        let err = ManagementError::Bridge {
            status: 404,
            error_type: "javax.management.InstanceNotFoundException".to_string(),
            message: "no broker".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Management error (404) javax.management.InstanceNotFoundException: no broker"
        );
    }

    #[test]
    fn exec_url_trims_trailing_slash() {
        let config = ApiClientConfig::new("http://localhost:8161/console/jolokia/");
        assert_eq!(config.exec_url(), "http://localhost:8161/console/jolokia");
        assert!(config.credentials.is_none());

        let config = config.with_credentials("admin", "secret");
        assert_eq!(
            config.credentials,
            Some(Credentials {
                username: "admin".to_string(),
                password: "secret".to_string(),
            })
        );
    }
}
