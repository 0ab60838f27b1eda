//! Custom Yew hooks for the console.

mod use_local_storage;
mod use_sessions;

pub use use_local_storage::use_local_storage;
pub use use_sessions::{use_sessions_view, GridAction};
