//! Jolokia wire format for MBean `exec` requests.

use serde::{Deserialize, Serialize};

use crate::api::ManagementError;
use crate::protocol::JOLOKIA_STATUS_OK;

/// A Jolokia `exec` request, POSTed as a JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    pub mbean: String,
    pub operation: String,
    pub arguments: Vec<serde_json::Value>,
}

impl ExecRequest {
    pub fn new(
        mbean: impl Into<String>,
        operation: impl Into<String>,
        arguments: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            request_type: "exec".to_string(),
            mbean: mbean.into(),
            operation: operation.into(),
            arguments,
        }
    }
}

/// A Jolokia reply.
///
/// The agent answers HTTP 200 even when the operation fails; the real
/// outcome is in `status`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecResponse {
    pub status: u16,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl ExecResponse {
    /// Convert into the operation's return value, or a bridge error
    pub fn into_result(self) -> Result<serde_json::Value, ManagementError> {
        if self.status != JOLOKIA_STATUS_OK {
            return Err(ManagementError::Bridge {
                status: self.status,
                error_type: self.error_type.unwrap_or_else(|| "unknown".to_string()),
                message: self.error.unwrap_or_default(),
            });
        }
        Ok(self.value.unwrap_or(serde_json::Value::Null))
    }
}

/// Decode a raw Jolokia reply body
pub fn decode_response(body: &str) -> Result<serde_json::Value, ManagementError> {
    let response: ExecResponse = serde_json::from_str(body)?;
    response.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exec_request_wire_shape() {
        let req = ExecRequest::new(
            "org.apache.activemq.artemis:broker=\"0.0.0.0\"",
            "listSessions(java.lang.String, int, int)",
            vec![json!("{}"), json!(1), json!(100)],
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["type"], "exec");
        assert_eq!(value["operation"], "listSessions(java.lang.String, int, int)");
        assert_eq!(value["arguments"], json!(["{}", 1, 100]));
    }

    #[test]
    fn successful_reply_yields_value() {
        let body = r#"{"request":{},"value":"{\"data\":[],\"count\":0}","timestamp":1700000000,"status":200}"#;
        let value = decode_response(body).unwrap();
        assert_eq!(value, json!("{\"data\":[],\"count\":0}"));
    }

    #[test]
    fn error_status_becomes_bridge_error() {
        let body = r#"{"error_type":"javax.management.InstanceNotFoundException","error":"broker not found","status":404}"#;
        match decode_response(body) {
            Err(ManagementError::Bridge {
                status,
                error_type,
                message,
            }) => {
                assert_eq!(status, 404);
                assert_eq!(error_type, "javax.management.InstanceNotFoundException");
                assert_eq!(message, "broker not found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn garbage_body_is_parse_error() {
        assert!(matches!(
            decode_response("<html>login</html>"),
            Err(ManagementError::Parse(_))
        ));
    }
}
