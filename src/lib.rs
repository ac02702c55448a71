//! # Remote Command Server
//!
//! Runs registered shell commands over HTTP. Each project pairs a working directory
//! with a command and can only be triggered with a bearer token issued for it.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use remote_command_server::server::{AppState, create_router};
//! use remote_command_server::store::SqliteStore;
//!
//! let store = SqliteStore::open("./remote-command.db").unwrap();
//! let state = Arc::new(AppState::new(Arc::new(store), None));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the provisioning CLI. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod server;
pub mod store;
pub mod types;
