use super::ConnectionState;
use crate::error::TransportError;
use crate::port::{DeliveryResult, DeliveryTransport};
use crate::response::ResponseStatus;
use bytes::Bytes;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info, instrument, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Acknowledgement text frame sent by the storage service for each record.
#[derive(Debug, Deserialize)]
struct StorageAck {
    status: ResponseStatus,
    #[serde(rename = "payloadType", default)]
    payload_type: Option<String>,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Long-lived WebSocket client shared by every request of the service.
///
/// The connection state lives in a `watch` cell and only changes through
/// compare-and-set transitions. The writer half sits behind a mutex, and
/// both `deliver` and every transition to `Closed` hold that mutex, so a
/// frame is never written while the connection is changing state and
/// concurrent deliveries never interleave.
pub struct SocketTransport {
    url: String,
    state: watch::Sender<ConnectionState>,
    writer: Mutex<Option<WsSink>>,
}

impl SocketTransport {
    /// Start connecting to `url` in the background and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(url: impl Into<String>) -> Arc<Self> {
        let transport = Arc::new(Self::new(url));
        let session = Arc::clone(&transport);
        tokio::spawn(async move { session.run().await });
        transport
    }

    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: watch::Sender::new(ConnectionState::Connecting),
            writer: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Observe state changes (startup logging, readiness checks).
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Close the connection locally. No-op when already closed.
    pub async fn close(&self) {
        self.close_session(false, None, "closed locally").await;
    }

    fn transition(&self, next: ConnectionState) -> bool {
        self.state.send_if_modified(|current| {
            if current.can_transition_to(next) {
                *current = next;
                true
            } else {
                false
            }
        })
    }

    async fn run(self: Arc<Self>) {
        let stream = match connect_async(self.url.as_str()).await {
            Ok((stream, _response)) => stream,
            Err(e) => {
                self.on_error(&e.to_string());
                self.transition(ConnectionState::Closed);
                return;
            }
        };
        let (sink, mut source) = stream.split();

        {
            let mut writer = self.writer.lock().await;
            if !self.transition(ConnectionState::Open) {
                // closed locally while the handshake was in flight
                return;
            }
            *writer = Some(sink);
        }
        self.on_open();

        while let Some(frame) = source.next().await {
            match frame {
                Ok(Message::Text(text)) => self.on_message(&text),
                Ok(Message::Binary(data)) => {
                    debug!(bytes = data.len(), "Ignoring binary frame from storage service");
                }
                Ok(Message::Close(frame)) => {
                    let (code, reason) = match &frame {
                        Some(frame) => (Some(u16::from(frame.code)), (*frame.reason).to_owned()),
                        None => (None, String::new()),
                    };
                    self.close_session(true, code, &reason).await;
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    self.on_error(&e.to_string());
                    break;
                }
            }
        }

        self.close_session(true, None, "connection lost").await;
    }

    async fn close_session(&self, remote: bool, code: Option<u16>, reason: &str) {
        let sink = {
            let mut writer = self.writer.lock().await;
            if !self.transition(ConnectionState::Closed) {
                return;
            }
            writer.take()
        };

        if let Some(mut sink) = sink {
            if !remote {
                if let Err(e) = sink.close().await {
                    debug!(error = %e, "Close handshake did not complete");
                }
            }
        }

        self.on_close(code, reason, remote);
    }

    #[instrument(skip(self, payload), fields(payload_size = payload.len()))]
    async fn send_binary(&self, payload: Bytes) -> DeliveryResult {
        if !self.state().is_open() {
            warn!(state = %self.state(), "Message could not be sent, connection not open");
            return DeliveryResult::Failed(TransportError::NotConnected);
        }

        let mut writer = self.writer.lock().await;
        let sink = match writer.as_mut() {
            Some(sink) if self.state().is_open() => sink,
            _ => {
                warn!(state = %self.state(), "Connection closed before the message could be sent");
                return DeliveryResult::Failed(TransportError::NotConnected);
            }
        };

        match sink.send(Message::binary(payload)).await {
            Ok(()) => {
                debug!("Sent binary record to storage service");
                DeliveryResult::Delivered
            }
            Err(e) => {
                let reason = e.to_string();
                // the writer is unusable after a failed send
                writer.take();
                let closed = self.transition(ConnectionState::Closed);
                drop(writer);
                if closed {
                    self.on_error(&reason);
                    self.on_close(None, &reason, false);
                }
                DeliveryResult::Failed(TransportError::Send(reason))
            }
        }
    }

    fn on_open(&self) {
        info!(url = %self.url, "Opened connection to storage service");
    }

    fn on_message(&self, text: &str) {
        match serde_json::from_str::<StorageAck>(text) {
            Ok(ack) if ack.status == ResponseStatus::Error => {
                warn!(
                    payload_type = ack.payload_type.as_deref().unwrap_or(""),
                    payload = %ack.payload,
                    "Storage service rejected a record"
                );
            }
            Ok(ack) => {
                debug!(payload = %ack.payload, "Storage service acknowledged a record");
            }
            Err(_) => info!(frame = text, "Received message from storage service"),
        }
    }

    fn on_close(&self, code: Option<u16>, reason: &str, remote: bool) {
        info!(
            url = %self.url,
            code = code.unwrap_or_default(),
            reason,
            remote,
            "Connection to storage service closed"
        );
    }

    fn on_error(&self, err: &str) {
        error!(url = %self.url, error = err, "Storage service connection error");
    }
}

impl DeliveryTransport for SocketTransport {
    fn deliver(
        &self,
        payload: Bytes,
    ) -> Pin<Box<dyn Future<Output = DeliveryResult> + Send + '_>> {
        Box::pin(self.send_binary(payload))
    }

    fn kind(&self) -> &'static str {
        "socket"
    }
}
