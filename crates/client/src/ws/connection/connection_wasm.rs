//! WASM/Web-specific WebSocket implementation using web_sys::WebSocket.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::Task;
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use parley_shared::ClientFrame;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::{dispatch_text, set_state, ConnectionState, SocketEvent, WsHandle};

/// A WebSocket connection to one channel (WASM implementation)
pub struct WsConnection {
    pub channel_id: i64,
    state: Rc<Cell<ConnectionState>>,
    sender: UnboundedSender<ClientFrame>,
    task: Task,
}

impl WsConnection {
    /// Open a connection; events are delivered to `on_event` on the UI task.
    pub fn new(
        url: String,
        channel_id: i64,
        on_event: impl FnMut(SocketEvent) + 'static,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let state = Rc::new(Cell::new(ConnectionState::Connecting));

        let task = spawn(run_connection(
            url,
            channel_id,
            state.clone(),
            receiver,
            Box::new(on_event),
        ));

        Self {
            channel_id,
            state,
            sender,
            task,
        }
    }

    /// Get a handle for sending frames
    pub fn handle(&self) -> WsHandle {
        WsHandle::new(self.sender.clone(), self.state.clone(), self.channel_id)
    }

    /// Close the socket and stop delivering events.
    pub fn close(self) {
        self.state.set(ConnectionState::Closed);
        self.sender.close_channel();
        // Cancelling drops the task's SocketGuard, which closes the socket.
        self.task.cancel();
        crate::log_info!("WebSocket for channel {} released", self.channel_id);
    }
}

/// Browser callbacks translated into a stream.
enum BrowserEvent {
    Open,
    Text(String),
    Closed(String),
    Error,
}

enum Step {
    Socket(BrowserEvent),
    Send(ClientFrame),
}

/// Owns the socket and its callbacks; closes the socket when dropped.
struct SocketGuard {
    ws: WebSocket,
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
    _onerror: Closure<dyn FnMut(ErrorEvent)>,
}

impl Drop for SocketGuard {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        let _ = self.ws.close();
    }
}

fn open_socket(url: &str, events: UnboundedSender<BrowserEvent>) -> Result<SocketGuard, String> {
    let ws = WebSocket::new(url).map_err(|e| format!("Failed to create WebSocket: {:?}", e))?;

    let tx = events.clone();
    let onopen = Closure::wrap(Box::new(move |_: Event| {
        let _ = tx.unbounded_send(BrowserEvent::Open);
    }) as Box<dyn FnMut(Event)>);
    ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

    let tx = events.clone();
    let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Some(text) = e.data().as_string() {
            let _ = tx.unbounded_send(BrowserEvent::Text(text));
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

    let tx = events.clone();
    let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
        let reason = if e.reason().is_empty() {
            format!("Code {}", e.code())
        } else {
            e.reason()
        };
        let _ = tx.unbounded_send(BrowserEvent::Closed(reason));
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

    let tx = events;
    let onerror = Closure::wrap(Box::new(move |_: ErrorEvent| {
        let _ = tx.unbounded_send(BrowserEvent::Error);
    }) as Box<dyn FnMut(ErrorEvent)>);
    ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    Ok(SocketGuard {
        ws,
        _onopen: onopen,
        _onmessage: onmessage,
        _onclose: onclose,
        _onerror: onerror,
    })
}

async fn run_connection(
    url: String,
    channel_id: i64,
    state: Rc<Cell<ConnectionState>>,
    receiver: UnboundedReceiver<ClientFrame>,
    mut on_event: Box<dyn FnMut(SocketEvent)>,
) {
    on_event(SocketEvent::State(ConnectionState::Connecting));

    let (events_tx, events_rx) = unbounded::<BrowserEvent>();
    let guard = match open_socket(&url, events_tx) {
        Ok(guard) => guard,
        Err(e) => {
            crate::log_error!("WebSocket error for channel {}: {}", channel_id, e);
            set_state(&state, ConnectionState::Closed, &mut *on_event);
            return;
        }
    };

    let mut steps = futures_util::stream::select(
        events_rx.map(Step::Socket),
        receiver.map(Step::Send),
    );

    while let Some(step) = steps.next().await {
        match step {
            Step::Socket(BrowserEvent::Open) => {
                crate::log_info!("WebSocket connected to channel {}", channel_id);
                set_state(&state, ConnectionState::Open, &mut *on_event);
            }
            Step::Socket(BrowserEvent::Text(text)) => dispatch_text(channel_id, &text, &mut *on_event),
            Step::Socket(BrowserEvent::Closed(reason)) => {
                crate::log_info!("WebSocket to channel {} closed: {}", channel_id, reason);
                break;
            }
            Step::Socket(BrowserEvent::Error) => {
                crate::log_error!("WebSocket error on channel {}", channel_id);
            }
            Step::Send(frame) => {
                if guard.ws.ready_state() != WebSocket::OPEN {
                    crate::log_warn!("WebSocket for channel {} no longer open", channel_id);
                    continue;
                }
                match frame.to_json() {
                    Ok(json) => {
                        crate::log_debug!("Sending to channel {}: {}", channel_id, json);
                        if let Err(e) = guard.ws.send_with_str(&json) {
                            crate::log_error!("Send failed: {:?}", e);
                        }
                    }
                    Err(e) => crate::log_error!("Serialize failed: {}", e),
                }
            }
        }
    }

    drop(guard);
    set_state(&state, ConnectionState::Closed, &mut *on_event);
}
