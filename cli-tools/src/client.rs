//! Native Jolokia client implementation using reqwest

use reqwest::{Client, StatusCode};
use shared::api::{ApiClientConfig, ManagementBridge, ManagementError};
use shared::jolokia::{self, ExecRequest};

/// Native management bridge using reqwest
pub struct NativeJolokiaClient {
    client: Client,
    config: ApiClientConfig,
}

impl NativeJolokiaClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ManagementError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ManagementError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(creds) = &self.config.credentials {
            req.basic_auth(&creds.username, Some(&creds.password))
        } else {
            req
        }
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ManagementError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ManagementError::Auth(format!(
                "Console rejected credentials ({})",
                status.as_u16()
            )));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ManagementError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ManagementError::Network(e.to_string()))?;
        jolokia::decode_response(&body)
    }
}

impl ManagementBridge for NativeJolokiaClient {
    async fn exec(&self, request: &ExecRequest) -> Result<serde_json::Value, ManagementError> {
        let url = self.config.exec_url();
        tracing::debug!(mbean = %request.mbean, operation = %request.operation, "jolokia exec");

        let req = self.add_auth(self.client.post(&url)).json(request);
        let response = req
            .send()
            .await
            .map_err(|e| ManagementError::Network(e.to_string()))?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn list_request() -> ExecRequest {
        ExecRequest::new(
            "org.apache.activemq.artemis:broker=\"0.0.0.0\"",
            shared::protocol::LIST_SESSIONS_OPERATION,
            vec![json!("{}"), json!(1), json!(100)],
        )
    }

    fn client_for(server: &MockServer) -> NativeJolokiaClient {
        let config = ApiClientConfig::new(format!("{}/console/jolokia", server.uri()));
        NativeJolokiaClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn exec_posts_request_and_returns_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/console/jolokia"))
            .and(body_partial_json(json!({
                "type": "exec",
                "operation": "listSessions(java.lang.String, int, int)",
                "arguments": ["{}", 1, 100]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "request": {},
                "value": "{\"data\":[],\"count\":0}",
                "status": 200
            })))
            .mount(&server)
            .await;

        let value = client_for(&server).exec(&list_request()).await.unwrap();
        assert_eq!(value, json!("{\"data\":[],\"count\":0}"));
    }

    #[tokio::test]
    async fn sends_basic_auth_when_configured() {
        let server = MockServer::start().await;
        // admin:admin
        Mock::given(method("POST"))
            .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": null,
                "status": 200
            })))
            .mount(&server)
            .await;

        let config = ApiClientConfig::new(server.uri()).with_credentials("admin", "admin");
        let client = NativeJolokiaClient::new(config).unwrap();
        let value = client.exec(&list_request()).await.unwrap();
        assert_eq!(value, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn bridge_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_type": "javax.management.InstanceNotFoundException",
                "error": "org.apache.activemq.artemis:broker=\"nope\"",
                "status": 404
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).exec(&list_request()).await.unwrap_err();
        assert!(matches!(err, ManagementError::Bridge { status: 404, .. }));
    }

    #[tokio::test]
    async fn unauthorized_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).exec(&list_request()).await.unwrap_err();
        assert!(matches!(err, ManagementError::Auth(_)));
    }

    #[tokio::test]
    async fn http_failure_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).exec(&list_request()).await.unwrap_err();
        assert_eq!(
            err,
            ManagementError::Server {
                status: 502,
                message: "bad gateway".to_string(),
            }
        );
    }
}
