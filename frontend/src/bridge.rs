//! Browser Jolokia client using gloo-net

use gloo_net::http::Request;
use shared::api::{ApiClientConfig, ManagementBridge, ManagementError};
use shared::jolokia::{self, ExecRequest};

/// Management bridge for the browser. Authentication rides on the
/// console's session cookie.
pub struct BrowserJolokiaClient {
    config: ApiClientConfig,
}

impl BrowserJolokiaClient {
    pub fn new(config: ApiClientConfig) -> Self {
        Self { config }
    }
}

impl ManagementBridge for BrowserJolokiaClient {
    async fn exec(&self, request: &ExecRequest) -> Result<serde_json::Value, ManagementError> {
        let response = Request::post(&self.config.exec_url())
            .json(request)
            .map_err(|e| ManagementError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ManagementError::Network(e.to_string()))?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(ManagementError::Auth(format!(
                "Console session rejected ({})",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ManagementError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ManagementError::Server {
                status,
                message: body,
            });
        }

        jolokia::decode_response(&body)
    }
}
