//! Workspace selection, broker MBean naming, and the cross-view
//! navigation context.

use serde::{Deserialize, Serialize};

use crate::api::ManagementError;

/// The folder path currently selected in the JMX tree,
/// e.g. `["org.apache.activemq.artemis", "0.0.0.0"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSelection {
    pub folder_names: Vec<String>,
}

impl WorkspaceSelection {
    pub fn new(folder_names: Vec<String>) -> Self {
        Self { folder_names }
    }

    pub fn for_broker(domain: impl Into<String>, broker: impl Into<String>) -> Self {
        Self {
            folder_names: vec![domain.into(), broker.into()],
        }
    }

    /// Resolve `<domain>:broker=<name>` from the first two folder segments
    pub fn broker_mbean(&self) -> Result<String, ManagementError> {
        match self.folder_names.as_slice() {
            [domain, broker, ..] if !domain.is_empty() && !broker.is_empty() => {
                let mbean = format!("{}:broker={}", domain, quote_value(broker));
                tracing::info!("broker={}", mbean);
                Ok(mbean)
            }
            _ => Err(ManagementError::NoBrokerSelected(self.folder_names.clone())),
        }
    }
}

/// Quote an ObjectName property value the way the broker registers it.
/// Values that are already quoted pass through unchanged.
fn quote_value(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '*' | '?' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Identifiers handed from one console view to another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    /// Connection selected in a sibling view
    #[serde(default)]
    pub connection: Option<String>,
    /// Session selected in a sibling view
    #[serde(default)]
    pub session: Option<String>,
}

/// Views a row action can lead to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Connections,
}

impl NavTarget {
    pub fn path(&self) -> &'static str {
        match self {
            NavTarget::Connections => "/artemis/connections",
        }
    }
}

/// Result of a navigating row action: where to go, carrying which context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub target: NavTarget,
    pub context: NavigationContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_mbean_from_folders() {
        let selection = WorkspaceSelection::for_broker("org.apache.activemq.artemis", "0.0.0.0");
        assert_eq!(
            selection.broker_mbean().unwrap(),
            "org.apache.activemq.artemis:broker=\"0.0.0.0\""
        );
    }

    #[test]
    fn extra_segments_are_ignored() {
        let selection = WorkspaceSelection::new(vec![
            "org.apache.activemq.artemis".to_string(),
            "\"broker-a\"".to_string(),
            "addresses".to_string(),
        ]);
        assert_eq!(
            selection.broker_mbean().unwrap(),
            "org.apache.activemq.artemis:broker=\"broker-a\""
        );
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(quote_value("a*b"), "\"a\\*b\"");
        assert_eq!(quote_value("x\"y"), "\"x\\\"y\"");
        assert_eq!(quote_value("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote_value("who?"), "\"who\\?\"");
        assert_eq!(quote_value("line\nbreak"), "\"line\\nbreak\"");
        // A lone quote is not an already-quoted value
        assert_eq!(quote_value("\""), "\"\\\"\"");
        assert_eq!(quote_value("\"b-1\""), "\"b-1\"");
    }

    #[test]
    fn missing_broker_is_an_error() {
        let selection = WorkspaceSelection::new(vec!["org.apache.activemq.artemis".to_string()]);
        assert!(matches!(
            selection.broker_mbean(),
            Err(ManagementError::NoBrokerSelected(_))
        ));
        assert!(WorkspaceSelection::default().broker_mbean().is_err());
    }

    #[test]
    fn navigation_context_tolerates_missing_slots() {
        let ctx: NavigationContext = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx, NavigationContext::default());
    }
}
