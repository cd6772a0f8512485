//! fish-server: HTTP API server for the fish catalog
//!
//! This crate provides:
//! - REST endpoints to list, fetch, randomly pick and create fish
//! - A Basic-auth protected admin page
//! - Request ID propagation and JSON error responses
//!
//! # Architecture
//!
//! The server is built on Axum. The [`fish_store::Store`] is constructed by
//! the caller and injected through [`AppState`], so every router owns an
//! isolated store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fish_server::{config::ServerConfig, routes, state::AppState};
//! use fish_store::Store;
//!
//! let config = ServerConfig::from_env()?;
//! let app = routes::build_router(AppState::new(Store::new(), config));
//! ```

pub mod admin;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use fish_store;
