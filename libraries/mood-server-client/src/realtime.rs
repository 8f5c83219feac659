//! Websocket realtime backend.

use crate::error::{Result, ServerClientError};
use crate::protocol::{ClientFrame, ServerFrame};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use mood_core::{ChatMessage, ChatSubscription, PresenceMember, PresenceSubscription, Realtime};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Time allowed for connect plus acknowledgement
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Realtime backend over websocket
///
/// Opens one connection per subscription; dropping the subscription stops
/// its reader task, which closes the connection and with it the presence.
#[derive(Debug, Clone)]
pub struct WsRealtime {
    url: Url,
    handshake_timeout: Duration,
}

impl WsRealtime {
    /// Create a realtime client for a `ws://` or `wss://` endpoint
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with ws:// or wss://".into(),
            ));
        }

        Ok(Self {
            url,
            handshake_timeout: HANDSHAKE_TIMEOUT,
        })
    }

    /// Override the handshake timeout
    #[must_use]
    pub fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }

    /// Connect, send `frame` and wait for the server's acknowledgement
    async fn open(&self, channel: &str, frame: ClientFrame) -> Result<Socket> {
        let handshake = async {
            let (mut socket, _response) = connect_async(self.url.as_str())
                .await
                .map_err(|e| ServerClientError::WebSocket(format!("Failed to connect to {}: {e}", self.url)))?;

            send_frame(&mut socket, &frame).await?;
            wait_for_ack(&mut socket, channel).await?;
            Ok::<_, ServerClientError>(socket)
        };

        time::timeout(self.handshake_timeout, handshake)
            .await
            .map_err(|_| ServerClientError::Timeout(format!("subscribing to {channel}")))?
    }
}

#[async_trait]
impl Realtime for WsRealtime {
    async fn join_presence(
        &self,
        channel: &str,
        member: PresenceMember,
    ) -> mood_core::Result<PresenceSubscription> {
        let frame = ClientFrame::Join {
            channel: channel.to_string(),
            member,
        };
        let socket = self.open(channel, frame).await?;
        info!(channel = %channel, "Presence channel joined");

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(read_frames(socket, channel.to_string(), move |frame| match frame {
            ServerFrame::Presence { count, .. } => tx.send(count).is_ok(),
            _ => true,
        }));

        Ok(PresenceSubscription::new(rx, AbortOnDrop(task)))
    }

    async fn subscribe_chat(&self, room_id: &str) -> mood_core::Result<ChatSubscription> {
        let channel = format!("chat:{room_id}");
        let frame = ClientFrame::Subscribe {
            channel: channel.clone(),
            room_id: room_id.to_string(),
        };
        let socket = self.open(&channel, frame).await?;
        info!(channel = %channel, "Chat inserts subscribed");

        let (tx, rx) = mpsc::unbounded_channel::<ChatMessage>();
        let task = tokio::spawn(read_frames(socket, channel, move |frame| match frame {
            ServerFrame::Insert { record, .. } => tx.send(record).is_ok(),
            _ => true,
        }));

        Ok(ChatSubscription::new(rx, AbortOnDrop(task)))
    }
}

/// Aborts the reader task (closing its socket) when dropped
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn send_frame(socket: &mut Socket, frame: &ClientFrame) -> Result<()> {
    let text = serde_json::to_string(frame)
        .map_err(|e| ServerClientError::Protocol(format!("Failed to encode frame: {e}")))?;
    socket
        .send(Message::Text(text))
        .await
        .map_err(|e| ServerClientError::WebSocket(e.to_string()))
}

fn parse_frame(text: &str) -> Option<ServerFrame> {
    match serde_json::from_str(text) {
        Ok(frame) => Some(frame),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed realtime frame");
            None
        }
    }
}

async fn wait_for_ack(socket: &mut Socket, channel: &str) -> Result<()> {
    while let Some(message) = socket.next().await {
        let text = match message.map_err(|e| ServerClientError::WebSocket(e.to_string()))? {
            Message::Text(text) => text,
            Message::Close(frame) => {
                return Err(ServerClientError::WebSocket(format!(
                    "Closed during handshake: {frame:?}"
                )));
            }
            _ => continue,
        };

        match parse_frame(&text) {
            Some(ServerFrame::Joined { channel: c } | ServerFrame::Subscribed { channel: c })
                if c == channel =>
            {
                return Ok(());
            }
            Some(ServerFrame::Error { message, .. }) => {
                return Err(ServerClientError::Protocol(message));
            }
            _ => {}
        }
    }

    Err(ServerClientError::WebSocket("Connection closed during handshake".into()))
}

/// Forward frames of `channel` to `deliver` until it returns false or the
/// connection ends
async fn read_frames<F>(mut socket: Socket, channel: String, mut deliver: F)
where
    F: FnMut(ServerFrame) -> bool + Send,
{
    while let Some(message) = socket.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(frame)) => {
                debug!(channel = %channel, ?frame, "Realtime connection closed by server");
                return;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!(channel = %channel, error = %e, "Realtime connection failed");
                return;
            }
        };

        let Some(frame) = parse_frame(&text) else {
            continue;
        };

        if let ServerFrame::Error { message, .. } = &frame {
            warn!(channel = %channel, error = %message, "Realtime channel error");
            return;
        }

        if frame.channel().is_some_and(|c| c != channel) {
            continue;
        }

        if !deliver(frame) {
            debug!(channel = %channel, "Subscriber gone");
            break;
        }
    }

    let leave = ClientFrame::Leave {
        channel: channel.clone(),
    };
    // Best effort; the connection is closing either way
    let _ = send_frame(&mut socket, &leave).await;
    let _ = socket.close(None).await;
}
