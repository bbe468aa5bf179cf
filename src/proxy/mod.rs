// proxy module - transfer gateway service

pub mod common;
pub mod config;
pub mod error;
pub mod handlers; // API endpoint handlers
pub mod server;
pub mod upstream; // Upstream client

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use server::{build_router, AppState, AxumServer};
