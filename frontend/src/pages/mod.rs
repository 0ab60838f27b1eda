pub mod connections;
pub mod sessions;
