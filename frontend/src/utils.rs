use shared::api::endpoints;
use web_sys::window;

/// Get the base HTTP URL (e.g., "http://localhost:8161" or "https://broker.example.com")
pub fn get_base_url() -> String {
    let Some(window) = window() else {
        return "http://localhost:8161".to_string();
    };
    let location = window.location();

    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:8161".to_string());

    format!("{}//{}", protocol, host)
}

/// Build a full URL from a path (e.g., "/console/jolokia" -> "http://localhost:8161/console/jolokia")
pub fn api_url(path: &str) -> String {
    format!("{}{}", get_base_url(), path)
}

/// Jolokia endpoint served next to this app
pub fn jolokia_url() -> String {
    api_url(endpoints::JOLOKIA)
}
