// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket transport speaking the broker wire protocol.
//!
//! Owns one socket at a time. The broker's reserved lifecycle frames are
//! consumed here: the handshake yields the socket id, pings are answered
//! with pongs, and error/close frames are folded into
//! [`TransportEvent::Dropped`]. Application events are the only frames that
//! cross the trait boundary.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use stockwire_core::traits::BrokerTransport;
use stockwire_core::types::{AuthSignature, ChannelId, RawEvent, SocketId, TransportEvent};
use stockwire_core::StockwireError;

use crate::wire::{self, ConnectionEstablished, Frame};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Where the broker lives and which application to attach to.
#[derive(Debug, Clone)]
pub struct BrokerEndpoint {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub app_key: String,
}

impl BrokerEndpoint {
    fn url(&self) -> String {
        let scheme = if self.use_tls { "wss" } else { "ws" };
        format!(
            "{scheme}://{}:{}/app/{}?protocol=7&client=stockwire&version={}",
            self.host,
            self.port,
            self.app_key,
            env!("CARGO_PKG_VERSION"),
        )
    }
}

/// One connection to the broker. Created disconnected; `connect` may be
/// called again after a drop or an explicit `disconnect`.
pub struct PusherTransport {
    endpoint: BrokerEndpoint,
    socket: Option<WsStream>,
}

impl PusherTransport {
    pub fn new(endpoint: BrokerEndpoint) -> Self {
        Self {
            endpoint,
            socket: None,
        }
    }

    async fn send_frame(&mut self, frame: &Frame) -> Result<(), StockwireError> {
        let socket = self.socket.as_mut().ok_or_else(not_connected)?;
        socket
            .send(Message::Text(frame.to_json()))
            .await
            .map_err(|e| StockwireError::Transport {
                message: format!("socket send failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Reads the next well-formed frame. `None` means the peer closed the
    /// socket. Unparseable frames are skipped, not fatal.
    async fn read_frame(&mut self) -> Result<Option<Frame>, StockwireError> {
        let socket = self.socket.as_mut().ok_or_else(not_connected)?;
        loop {
            match socket.next().await {
                None => return Ok(None),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(Message::Text(text))) => match Frame::parse(&text) {
                    Ok(frame) => return Ok(Some(frame)),
                    Err(e) => {
                        warn!(error = %e, "skipping malformed broker frame");
                    }
                },
                // Binary frames and websocket-level ping/pong are handled
                // by the protocol layer.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    return Err(StockwireError::Transport {
                        message: format!("socket read failed: {e}"),
                        source: Some(Box::new(e)),
                    });
                }
            }
        }
    }
}

fn not_connected() -> StockwireError {
    StockwireError::Transport {
        message: "transport is not connected".into(),
        source: None,
    }
}

#[async_trait]
impl BrokerTransport for PusherTransport {
    async fn connect(&mut self) -> Result<SocketId, StockwireError> {
        let url = self.endpoint.url();
        debug!(host = %self.endpoint.host, port = self.endpoint.port, "connecting to broker");

        let (socket, _response) =
            connect_async(url.as_str())
                .await
                .map_err(|e| StockwireError::Transport {
                    message: format!("broker connection failed: {e}"),
                    source: Some(Box::new(e)),
                })?;
        self.socket = Some(socket);

        // The handshake completes when the broker announces the socket id.
        loop {
            let frame = self.read_frame().await?.ok_or_else(|| {
                StockwireError::Transport {
                    message: "connection closed during handshake".into(),
                    source: None,
                }
            })?;

            match frame.event.as_str() {
                wire::EVENT_CONNECTION_ESTABLISHED => {
                    let established: ConnectionEstablished =
                        serde_json::from_value(frame.decoded_data()).map_err(|e| {
                            StockwireError::Protocol(format!(
                                "malformed connection_established payload: {e}"
                            ))
                        })?;
                    info!(socket_id = %established.socket_id, "broker connection established");
                    return Ok(SocketId(established.socket_id));
                }
                wire::EVENT_ERROR => {
                    return Err(StockwireError::Transport {
                        message: format!("broker rejected connection: {}", frame.error_message()),
                        source: None,
                    });
                }
                other => {
                    debug!(event = %other, "ignoring pre-handshake frame");
                }
            }
        }
    }

    async fn subscribe(
        &mut self,
        channel: &ChannelId,
        auth: &AuthSignature,
    ) -> Result<(), StockwireError> {
        self.send_frame(&Frame::subscribe(channel, auth)).await?;

        // Events for the channel only flow after the broker's ack.
        loop {
            let frame = self.read_frame().await?.ok_or_else(|| {
                StockwireError::Transport {
                    message: format!("connection closed while subscribing to {channel}"),
                    source: None,
                }
            })?;

            match frame.event.as_str() {
                wire::EVENT_SUBSCRIPTION_SUCCEEDED
                    if frame.channel.as_deref() == Some(channel.as_str()) =>
                {
                    info!(channel = %channel, "channel subscription acknowledged");
                    return Ok(());
                }
                wire::EVENT_ERROR => {
                    return Err(StockwireError::Transport {
                        message: format!(
                            "subscription to {channel} rejected: {}",
                            frame.error_message()
                        ),
                        source: None,
                    });
                }
                wire::EVENT_PING => {
                    self.send_frame(&Frame::pong()).await?;
                }
                other => {
                    debug!(event = %other, "ignoring frame while awaiting subscription ack");
                }
            }
        }
    }

    async fn next_event(&mut self) -> Result<TransportEvent, StockwireError> {
        loop {
            match self.read_frame().await {
                Ok(None) => {
                    return Ok(TransportEvent::Dropped(
                        "connection closed by broker".into(),
                    ));
                }
                Err(e) => return Ok(TransportEvent::Dropped(e.to_string())),
                Ok(Some(frame)) => {
                    if frame.event == wire::EVENT_PING {
                        // Answer heartbeat; a send failure will surface on
                        // the next read as a drop.
                        let _ = self.send_frame(&Frame::pong()).await;
                        continue;
                    }
                    if frame.event == wire::EVENT_ERROR {
                        return Ok(TransportEvent::Dropped(frame.error_message()));
                    }
                    if frame.is_system() {
                        debug!(event = %frame.event, "ignoring broker system frame");
                        continue;
                    }
                    let payload = frame.decoded_data();
                    return Ok(TransportEvent::Raw(RawEvent {
                        name: frame.event,
                        channel: frame.channel,
                        payload,
                    }));
                }
            }
        }
    }

    async fn unsubscribe(&mut self, channel: &ChannelId) -> Result<(), StockwireError> {
        if self.socket.is_none() {
            return Ok(());
        }
        self.send_frame(&Frame::unsubscribe(channel)).await
    }

    async fn disconnect(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close(None).await;
            debug!("broker connection closed");
        }
    }
}
