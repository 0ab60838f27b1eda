//! Encoding of values kept in browser local storage.
//!
//! The broker keys are shared with the rest of the console, which stores
//! them as bare strings. Structured values are stored as JSON.

use crate::navigation::NavigationContext;

/// A value that can live under a local storage key
pub trait StoredValue: Sized {
    /// Decode a stored item. `None` means "use the default".
    fn decode(raw: &str) -> Option<Self>;

    fn encode(&self) -> Option<String>;
}

impl StoredValue for String {
    /// An empty item counts as unset
    fn decode(raw: &str) -> Option<Self> {
        (!raw.is_empty()).then(|| raw.to_string())
    }

    fn encode(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl StoredValue for NavigationContext {
    fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    fn encode(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_keys_are_bare_strings() {
        assert_eq!(
            String::decode("org.example.custom"),
            Some("org.example.custom".to_string())
        );
        assert_eq!(String::decode(""), None);
        assert_eq!(
            "org.apache.activemq.artemis".to_string().encode().as_deref(),
            Some("org.apache.activemq.artemis")
        );
    }

    #[test]
    fn navigation_context_is_json() {
        let ctx = NavigationContext {
            connection: Some("c-1".to_string()),
            session: None,
        };
        let raw = ctx.encode().unwrap();
        assert_eq!(NavigationContext::decode(&raw), Some(ctx));
        assert_eq!(NavigationContext::decode("not json"), None);
    }
}
