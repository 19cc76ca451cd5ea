pub mod config;
pub mod distributor;
pub mod grid;
pub mod transport;
pub mod utils;
pub mod web;

// Crate version exposed for runtime queries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
