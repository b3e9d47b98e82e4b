//! The per-channel realtime hook.

use dioxus::prelude::*;
use parley_shared::ChatMessage;

use super::connection::{ConnectionState, SocketEvent, WsConnection};
use crate::auth_session::AuthContext;
use crate::clock::{now_ms, sleep_ms};
use crate::stores::{ChannelFeed, Switch};

/// How long the typing timer idles when nobody is typing.
const TYPING_IDLE_TICK_MS: u64 = 250;

/// What `use_channel_feed` hands back to the chat pane.
#[derive(Clone, Copy)]
pub struct ChannelFeedHandle {
    pub feed: Signal<ChannelFeed>,
    pub state: Signal<ConnectionState>,
    connection: Signal<Option<WsConnection>>,
}

impl ChannelFeedHandle {
    /// Send a chat message; a no-op unless the socket is open.
    pub fn send_message(&self, content: &str, file_url: Option<&str>) -> bool {
        match self.connection.peek().as_ref() {
            Some(conn) => conn.handle().send_message(content, file_url),
            None => false,
        }
    }

    /// Announce that the user is typing; a no-op unless the socket is open.
    pub fn send_typing_indicator(&self) -> bool {
        match self.connection.peek().as_ref() {
            Some(conn) => conn.handle().send_typing(),
            None => false,
        }
    }
}

/// Keep a message list and typing set in sync with `channel_id`.
///
/// Each new channel id clears the previous state, fetches history once and
/// opens one socket. The socket and timer are released when the id changes
/// or the component unmounts.
pub fn use_channel_feed(channel_id: Signal<Option<i64>>) -> ChannelFeedHandle {
    let auth = use_context::<AuthContext>();
    let mut feed = use_signal(ChannelFeed::new);
    let mut state = use_signal(|| ConnectionState::Closed);
    let mut connection = use_signal(|| None::<WsConnection>);

    use_effect(move || {
        let selected = channel_id();

        let switch = feed.write().activate(selected);
        let ticket = match switch {
            Switch::Unchanged => return,
            Switch::Cleared => {
                if let Some(old) = connection.write().take() {
                    old.close();
                }
                state.set(ConnectionState::Closed);
                return;
            }
            Switch::Activated(ticket) => ticket,
        };

        if let Some(old) = connection.write().take() {
            old.close();
        }

        let client = auth.client();
        spawn(async move {
            match client.channel_messages(ticket.channel_id).await {
                Ok(records) => {
                    if !feed.peek().is_current(ticket) {
                        crate::log_debug!(
                            "Discarding stale history for channel {}",
                            ticket.channel_id
                        );
                        return;
                    }
                    let history = records.into_iter().map(ChatMessage::from).collect();
                    feed.write().apply_history(ticket, history);
                }
                Err(e) => crate::log_error!(
                    "Failed to load history for channel {}: {}",
                    ticket.channel_id,
                    e
                ),
            }
        });

        let url = auth.channel_ws_url(ticket.channel_id);
        let conn = WsConnection::new(url, ticket.channel_id, move |event| {
            if !feed.peek().is_current(ticket) {
                return;
            }
            match event {
                SocketEvent::State(next) => state.set(next),
                SocketEvent::Frame(frame) => {
                    feed.write().apply_frame(ticket, frame, now_ms());
                }
            }
        });
        connection.set(Some(conn));
    });

    // Single timer draining the typing queue.
    use_future(move || async move {
        loop {
            let wait = match feed.peek().typing().next_deadline() {
                Some(deadline) => deadline.saturating_sub(now_ms()).max(1),
                None => TYPING_IDLE_TICK_MS,
            };
            sleep_ms(wait).await;

            let now = now_ms();
            if feed.peek().typing().has_expired(now) {
                feed.write().expire_typing(now);
            }
        }
    });

    use_drop(move || {
        if let Some(old) = connection.write().take() {
            old.close();
        }
    });

    ChannelFeedHandle {
        feed,
        state,
        connection,
    }
}
