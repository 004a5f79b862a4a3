//! WebSocket wrapper: connect with a listener, send text/binary, disconnect.
//!
//! Forwards to [`tokio-tungstenite`](tokio_tungstenite); ping/pong and
//! frame-level concerns stay in the underlying library. Inbound traffic is
//! delivered through a caller-supplied [`WebSocketListener`] driven by a
//! single spawned reader task.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::{CloseFrame, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use crate::errors::{Result, WebSocketError};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Receiver for WebSocket events.
///
/// All methods default to no-ops; implement the ones you care about. The
/// listener is owned and driven by the reader task, so callbacks run on that
/// task, one at a time, in arrival order. The task ends after `on_close` or
/// `on_error`.
pub trait WebSocketListener: Send + 'static {
    /// The handshake completed and the connection is live.
    fn on_open(&mut self) {}

    /// A text message arrived.
    fn on_text(&mut self, text: String) {
        let _ = text;
    }

    /// A binary message arrived.
    fn on_binary(&mut self, data: Vec<u8>) {
        let _ = data;
    }

    /// The peer closed the connection (close code and reason, when supplied).
    /// Also delivered, without a frame, when the stream ends abruptly.
    fn on_close(&mut self, code: Option<u16>, reason: Option<String>) {
        let _ = (code, reason);
    }

    /// Reading from the connection failed; no further events follow.
    fn on_error(&mut self, error: WebSocketError) {
        let _ = error;
    }
}

/// Thin manager for a single WebSocket connection.
///
/// No protocol logic beyond what `tungstenite` provides: no reconnect, no
/// message queueing, no backpressure. Sending while disconnected returns
/// [`WebSocketError::NotConnected`].
///
/// # Example
/// ```no_run
/// use hinet::{WebSocketListener, WebSocketManager};
///
/// struct Echoes;
/// impl WebSocketListener for Echoes {
///     fn on_text(&mut self, text: String) {
///         println!("<- {text}");
///     }
/// }
///
/// # async fn run() -> hinet::Result<()> {
/// let mut ws = WebSocketManager::new();
/// ws.connect("wss://example.com/live", Echoes).await?;
/// ws.send_text("hello").await?;
/// ws.disconnect().await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Default)]
pub struct WebSocketManager {
    sink: Option<WsSink>,
    reader: Option<JoinHandle<()>>,
}

impl WebSocketManager {
    /// Create a manager with no active connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to `url` (`ws://` or `wss://`) and start delivering events to
    /// `listener`.
    ///
    /// `listener.on_open()` fires once the handshake has completed.
    /// Connecting while already connected drops the previous connection
    /// without a close handshake.
    pub async fn connect<L: WebSocketListener>(&mut self, url: &str, listener: L) -> Result<()> {
        let url = Url::parse(url)?;
        let (stream, _response) = connect_async(url.as_str())
            .await
            .map_err(WebSocketError::Protocol)?;
        tracing::debug!(%url, "WebSocket connected");

        let (sink, source) = stream.split();
        self.reader = Some(tokio::spawn(read_loop(source, listener)));
        self.sink = Some(sink);
        Ok(())
    }

    /// Send a text message.
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(WebSocketError::NotConnected)?;
        sink.send(Message::Text(text.to_owned()))
            .await
            .map_err(WebSocketError::Protocol)?;
        Ok(())
    }

    /// Send a binary message.
    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(WebSocketError::NotConnected)?;
        sink.send(Message::Binary(data))
            .await
            .map_err(WebSocketError::Protocol)?;
        Ok(())
    }

    /// Close the connection with a normal closure (code 1000).
    ///
    /// The reader task keeps running until the peer completes the close
    /// handshake, so a final `on_close` still reaches the listener.
    pub async fn disconnect(&mut self) -> Result<()> {
        let mut sink = self.sink.take().ok_or(WebSocketError::NotConnected)?;
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        };
        sink.send(Message::Close(Some(frame)))
            .await
            .map_err(WebSocketError::Protocol)?;
        tracing::debug!("WebSocket close frame sent");
        self.reader.take();
        Ok(())
    }

    /// Whether a connection is currently held.
    pub fn is_connected(&self) -> bool {
        self.sink.is_some()
    }
}

/// Drive `listener` from the read half until close, error, or stream end.
async fn read_loop<L: WebSocketListener>(mut source: WsSource, mut listener: L) {
    listener.on_open();
    while let Some(message) = source.next().await {
        match message {
            Ok(Message::Text(text)) => listener.on_text(text),
            Ok(Message::Binary(data)) => listener.on_binary(data),
            Ok(Message::Close(frame)) => {
                let (code, reason) = match frame {
                    Some(frame) => (
                        Some(u16::from(frame.code)),
                        Some(frame.reason.into_owned()),
                    ),
                    None => (None, None),
                };
                listener.on_close(code, reason);
                return;
            }
            // Ping/pong is answered inside tungstenite.
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "WebSocket read failed");
                listener.on_error(WebSocketError::Protocol(e));
                return;
            }
        }
    }
    // Stream ended without a close frame.
    listener.on_close(None, None);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    struct Quiet;
    impl WebSocketListener for Quiet {}

    #[tokio::test]
    async fn send_before_connect_is_not_connected() {
        let mut ws = WebSocketManager::new();
        let err = ws.send_text("nope").await.unwrap_err();
        assert!(matches!(
            err,
            Error::WebSocket(WebSocketError::NotConnected)
        ));
        assert!(!ws.is_connected());
    }

    #[tokio::test]
    async fn invalid_url_is_a_parse_error() {
        let mut ws = WebSocketManager::new();
        let err = ws.connect("not a url", Quiet).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
