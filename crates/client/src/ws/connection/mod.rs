//! WebSocket connection scoped to one channel.
//!
//! This module provides the shared types and conditionally includes
//! the platform-specific implementation. Connections are never re-opened:
//! close and error are logged and the state settles on `Closed`.

use std::cell::Cell;
use std::rc::Rc;

use futures_channel::mpsc::UnboundedSender;
use parley_shared::{ClientFrame, ServerFrame};

/// Connection state for a WebSocket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "live",
            ConnectionState::Closed => "offline",
        }
    }
}

/// Something the connection reports to its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    State(ConnectionState),
    Frame(ServerFrame),
}

/// Handle for sending frames through a WebSocket connection
#[derive(Clone)]
pub struct WsHandle {
    sender: UnboundedSender<ClientFrame>,
    state: Rc<Cell<ConnectionState>>,
    pub channel_id: i64,
}

impl WsHandle {
    pub(crate) fn new(
        sender: UnboundedSender<ClientFrame>,
        state: Rc<Cell<ConnectionState>>,
        channel_id: i64,
    ) -> Self {
        Self {
            sender,
            state,
            channel_id,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Queue a frame for the socket. Frames are dropped unless the socket is
    /// open; returns whether the frame was queued.
    pub fn send(&self, frame: ClientFrame) -> bool {
        if !self.is_open() {
            crate::log_debug!(
                "Channel {} socket is {}, dropping outbound frame",
                self.channel_id,
                self.state().label()
            );
            return false;
        }
        self.sender.unbounded_send(frame).is_ok()
    }

    /// Send a chat message to the channel
    pub fn send_message(&self, content: &str, file_url: Option<&str>) -> bool {
        self.send(ClientFrame::Message {
            content: content.to_string(),
            file_url: file_url.map(str::to_string),
        })
    }

    /// Tell the channel the user is typing
    pub fn send_typing(&self) -> bool {
        self.send(ClientFrame::Typing)
    }
}

/// Parse one text frame and forward it. Malformed frames are logged and dropped.
pub(crate) fn dispatch_text(channel_id: i64, text: &str, on_event: &mut dyn FnMut(SocketEvent)) {
    match ServerFrame::parse(text) {
        Ok(frame) => on_event(SocketEvent::Frame(frame)),
        Err(e) => crate::log_warn!("Dropping malformed frame on channel {}: {}", channel_id, e),
    }
}

pub(crate) fn set_state(
    state: &Cell<ConnectionState>,
    next: ConnectionState,
    on_event: &mut dyn FnMut(SocketEvent),
) {
    if state.get() != next {
        state.set(next);
        on_event(SocketEvent::State(next));
    }
}

// Include platform-specific implementation
#[cfg(target_arch = "wasm32")]
mod connection_wasm;
#[cfg(target_arch = "wasm32")]
pub use connection_wasm::WsConnection;

#[cfg(not(target_arch = "wasm32"))]
mod connection_native;
#[cfg(not(target_arch = "wasm32"))]
pub use connection_native::WsConnection;

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc::unbounded;

    #[test]
    fn sending_while_not_open_is_a_noop() {
        let (sender, mut receiver) = unbounded();
        let state = Rc::new(Cell::new(ConnectionState::Connecting));
        let handle = WsHandle::new(sender, state.clone(), 4);

        assert!(!handle.send_message("hello", None));
        assert!(!handle.send_typing());

        state.set(ConnectionState::Closed);
        assert!(!handle.send_message("hello", Some("/f.png")));
        assert!(receiver.try_next().is_err(), "nothing may be queued");
    }

    #[test]
    fn open_socket_queues_frames_in_order() {
        let (sender, mut receiver) = unbounded();
        let state = Rc::new(Cell::new(ConnectionState::Open));
        let handle = WsHandle::new(sender, state, 4);

        assert!(handle.send_typing());
        assert!(handle.send_message("hi", Some("/u/a.txt")));

        assert_eq!(receiver.try_next().unwrap(), Some(ClientFrame::Typing));
        assert_eq!(
            receiver.try_next().unwrap(),
            Some(ClientFrame::Message {
                content: "hi".to_string(),
                file_url: Some("/u/a.txt".to_string()),
            })
        );
    }

    #[test]
    fn malformed_text_is_dropped() {
        let mut seen = Vec::new();
        dispatch_text(1, "{oops", &mut |e| seen.push(e));
        dispatch_text(1, r#"{"type":"nope"}"#, &mut |e| seen.push(e));
        assert!(seen.is_empty());

        dispatch_text(1, r#"{"type":"typing","username":"z"}"#, &mut |e| seen.push(e));
        assert_eq!(
            seen,
            vec![SocketEvent::Frame(ServerFrame::Typing {
                username: "z".to_string()
            })]
        );
    }

    #[test]
    fn state_changes_are_reported_once() {
        let state = Cell::new(ConnectionState::Connecting);
        let mut seen = Vec::new();
        set_state(&state, ConnectionState::Open, &mut |e| seen.push(e));
        set_state(&state, ConnectionState::Open, &mut |e| seen.push(e));
        set_state(&state, ConnectionState::Closed, &mut |e| seen.push(e));
        assert_eq!(
            seen,
            vec![
                SocketEvent::State(ConnectionState::Open),
                SocketEvent::State(ConnectionState::Closed),
            ]
        );
    }
}
