//! # HTTP Server Module
//!
//! Serves the booking API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/v1/*` - Collections and booking RPC

pub mod config;
pub mod health;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
