//! Hook for typed localStorage persistence with automatic save on change.

use shared::StoredValue;
use yew::prelude::*;

/// Return value from the use_local_storage hook.
pub struct UseLocalStorage<T: Clone + PartialEq + 'static> {
    /// Current value
    pub value: T,
    /// Set a new value (automatically persists to localStorage)
    pub set: Callback<T>,
}

/// Load a value from localStorage
fn load_from_storage<T: StoredValue>(key: &str) -> Option<T> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
        .and_then(|raw| T::decode(&raw))
}

/// Save a value to localStorage
fn save_to_storage<T: StoredValue>(key: &str, value: &T) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        if let Some(raw) = value.encode() {
            let _ = storage.set_item(key, &raw);
        }
    }
}

/// Hook for managing state that persists to localStorage.
///
/// The value is loaded from localStorage on mount and saved whenever it
/// changes. If nothing is stored under `key`, `default` supplies the value.
///
/// # Example
/// ```ignore
/// let domain = use_local_storage("artemisJmxDomain", || DEFAULT_JMX_DOMAIN.to_string());
/// domain.set.emit("my.domain".to_string());
/// ```
#[hook]
pub fn use_local_storage<T, F>(key: &'static str, default: F) -> UseLocalStorage<T>
where
    T: Clone + PartialEq + StoredValue + 'static,
    F: FnOnce() -> T,
{
    let state = use_state(|| load_from_storage::<T>(key).unwrap_or_else(default));

    let set = {
        let state = state.clone();
        Callback::from(move |new_value: T| {
            save_to_storage(key, &new_value);
            state.set(new_value);
        })
    };

    UseLocalStorage {
        value: (*state).clone(),
        set,
    }
}
