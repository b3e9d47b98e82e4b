//! Native/Desktop WebSocket implementation using tokio-tungstenite.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::Task;
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::{SinkExt, StreamExt};
use parley_shared::ClientFrame;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{dispatch_text, set_state, ConnectionState, SocketEvent, WsHandle};

/// A WebSocket connection to one channel (Native implementation)
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
        self.task.cancel();
        crate::log_info!("WebSocket for channel {} released", self.channel_id);
    }
}

async fn run_connection(
    url: String,
    channel_id: i64,
    state: Rc<Cell<ConnectionState>>,
    mut receiver: UnboundedReceiver<ClientFrame>,
    mut on_event: Box<dyn FnMut(SocketEvent)>,
) {
    on_event(SocketEvent::State(ConnectionState::Connecting));

    let ws_stream = match connect_async(url.as_str()).await {
        Ok((ws_stream, _response)) => ws_stream,
        Err(e) => {
            crate::log_error!("WebSocket error for channel {}: {}", channel_id, e);
            set_state(&state, ConnectionState::Closed, &mut *on_event);
            return;
        }
    };

    set_state(&state, ConnectionState::Open, &mut *on_event);
    crate::log_info!("WebSocket connected to channel {}", channel_id);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    dispatch_text(channel_id, text.as_str(), &mut *on_event);
                }
                Some(Ok(Message::Close(_))) | None => {
                    crate::log_info!("WebSocket to channel {} closed by server", channel_id);
                    break;
                }
                Some(Ok(_)) => {
                    // Binary, ping and pong frames carry nothing for us; pongs are automatic.
                }
                Some(Err(e)) => {
                    crate::log_error!("WebSocket read error on channel {}: {}", channel_id, e);
                    break;
                }
            },
            outgoing = receiver.next() => match outgoing {
                Some(frame) => match frame.to_json() {
                    Ok(json) => {
                        crate::log_debug!("Sending to channel {}: {}", channel_id, json);
                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            crate::log_error!("Send failed on channel {}: {}", channel_id, e);
                            break;
                        }
                    }
                    Err(e) => crate::log_error!("Serialize failed: {}", e),
                },
                None => {
                    let _ = write.close().await;
                    break;
                }
            },
        }
    }

    set_state(&state, ConnectionState::Closed, &mut *on_event);
}
