//! Realtime channel connection.
//!
//! ```text
//!   use_channel_feed(channel_id)
//!        │  one activation per channel id
//!        ├──────────────► ApiClient::channel_messages  (history, once)
//!        └──────────────► WsConnection  /ws/{id}?token=…
//!                               │ SocketEvent
//!                               ▼
//!                        ChannelFeed (messages + typing)
//!                               │ Signal
//!                               ▼
//!                          chat pane re-renders
//! ```
//!
//! Frames and history results are tagged with the activation that requested
//! them, so nothing from a previous channel leaks into the current one.

mod connection;
mod hooks;

pub use connection::{ConnectionState, SocketEvent, WsConnection, WsHandle};
pub use hooks::{use_channel_feed, ChannelFeedHandle};
