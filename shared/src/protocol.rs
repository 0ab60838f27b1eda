/// JMX operation invoked on the broker MBean to list sessions.
pub const LIST_SESSIONS_OPERATION: &str = "listSessions(java.lang.String, int, int)";

/// JMX domain used when none is configured.
pub const DEFAULT_JMX_DOMAIN: &str = "org.apache.activemq.artemis";

/// Broker name used when none is configured.
pub const DEFAULT_BROKER_NAME: &str = "0.0.0.0";

/// Resource name used in user-facing error notifications.
pub const SESSIONS_RESOURCE: &str = "sessions";

/// Local storage key holding the JMX domain in the browser app.
pub const JMX_DOMAIN_STORAGE_KEY: &str = "artemisJmxDomain";

/// Local storage key holding the broker name in the browser app.
pub const BROKER_NAME_STORAGE_KEY: &str = "artemisBrokerName";

/// Jolokia status code for a successful request.
pub const JOLOKIA_STATUS_OK: u16 = 200;

/// Local storage key holding the navigation context handed between views.
pub const NAVIGATION_STORAGE_KEY: &str = "artemisNavigation";
