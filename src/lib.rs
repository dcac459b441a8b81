// NESQL Rust implementation
// Read-only browsing and search over exported game data

pub mod cli;
pub mod config;
pub mod display;
pub mod formatter;
pub mod plugin;
pub mod registry;
pub mod search;
pub mod server;
pub mod store;
