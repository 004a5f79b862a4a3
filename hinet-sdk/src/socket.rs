//! Raw TCP socket wrapper: connect, write bytes, shut down. Nothing else.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::errors::{Result, SocketError};

/// Thin manager for a single outbound TCP connection.
///
/// Forwards almost directly to [`tokio::net::TcpStream`]: no framing, no read
/// loop, no reconnect, no keep-alive. Operating on a manager that is not
/// connected returns [`SocketError::NotConnected`] rather than silently doing
/// nothing.
///
/// # Example
/// ```no_run
/// use hinet::SocketManager;
///
/// # async fn run() -> hinet::Result<()> {
/// let mut socket = SocketManager::new("example.com", 4000);
/// socket.connect().await?;
/// socket.send_message(b"ping").await?;
/// socket.disconnect().await?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct SocketManager {
    host: String,
    port: u16,
    stream: Option<TcpStream>,
}

impl SocketManager {
    /// Create a manager for `host:port`. No connection is made yet.
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            stream: None,
        }
    }

    /// Establish a connection to the configured host and port.
    ///
    /// Connecting while already connected drops the previous stream and
    /// replaces it with the new one.
    pub async fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(SocketError::Io)?;
        tracing::debug!(host = %self.host, port = self.port, "socket connected");
        self.stream = Some(stream);
        Ok(())
    }

    /// Send `message` over the connection.
    pub async fn send_message(&mut self, message: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(SocketError::NotConnected)?;
        stream.write_all(message).await.map_err(SocketError::Io)?;
        stream.flush().await.map_err(SocketError::Io)?;
        Ok(())
    }

    /// Shut the connection down and release the stream.
    pub async fn disconnect(&mut self) -> Result<()> {
        let mut stream = self.stream.take().ok_or(SocketError::NotConnected)?;
        stream.shutdown().await.map_err(SocketError::Io)?;
        tracing::debug!(host = %self.host, port = self.port, "socket disconnected");
        Ok(())
    }

    /// Whether a stream is currently held.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn send_before_connect_is_not_connected() {
        let mut socket = SocketManager::new("localhost", 1);
        let err = socket.send_message(b"nope").await.unwrap_err();
        assert!(matches!(err, Error::Socket(SocketError::NotConnected)));
        assert!(!socket.is_connected());
    }

    #[tokio::test]
    async fn disconnect_before_connect_is_not_connected() {
        let mut socket = SocketManager::new("localhost", 1);
        let err = socket.disconnect().await.unwrap_err();
        assert!(matches!(err, Error::Socket(SocketError::NotConnected)));
    }
}
