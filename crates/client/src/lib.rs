//! Parley Client - Dioxus chat application
//!
//! The web/desktop client for a Discord-style chat service: token storage,
//! the REST client, per-channel realtime feeds and the pages built on them.

pub mod logging;
pub mod api_client;
pub mod auth_session;
pub mod clock;
pub mod config;
pub mod storage;
pub mod stores;
pub mod ws;

pub mod components;
pub mod hooks;
pub mod routes;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthContext, AuthProvider, AuthSession};
pub use config::ClientConfig;
pub use routes::Route;
