//! Unified error types for the `hinet` crate.
//!
//! This module centralizes all failures that can occur while using the three
//! wrappers and provides a single top-level [`Error`] enum plus the convenient
//! [`Result`] alias. Errors from lower layers (`reqwest`, `tungstenite`, URL
//! parsing, the token store) are mapped into structured variants so callers
//! can handle them precisely.

use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building a [`RestClient`](crate::RestClient).
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to rehydrate the bearer token from its persistence store.
    #[error("Failed to read the token store: {0}")]
    TokenStore(#[from] std::io::Error),
}

// --- The Main Operational Error Enum ---

/// The crate’s top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`] — HTTP transport/server/envelope issues
/// - [`Error::Token`] — bearer-token persistence issues
/// - [`Error::Socket`] — raw TCP socket issues
/// - [`Error::WebSocket`] — WebSocket handshake/protocol issues
/// - [`Error::Parse`] — URL parsing failures
/// - [`Error::Build`] — construction of the client failed
///
/// Most lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, envelope, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// Bearer-token persistence failed.
    #[error("Token operation failed: {0}")]
    Token(#[from] TokenError),

    /// TCP socket operation failed.
    #[error("Socket operation failed: {0}")]
    Socket(#[from] SocketError),

    /// WebSocket operation failed.
    #[error("WebSocket operation failed: {0}")]
    WebSocket(#[from] WebSocketError),

    /// URL parsing failed while preparing a connection.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Building the client failed (reqwest or token-store configuration).
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

// --- Consolidated Request Error ---

/// Transport, server-side, and envelope errors for the REST pipeline.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. Includes status and body message.
    #[error("Server responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// Short description or the server response body captured for context.
        message: String,
    },

    /// The server answered with a success status but no body where an
    /// envelope was expected.
    #[error("empty response body")]
    EmptyBody,

    /// Caller supplied an invalid URL/path/argument for this API.
    #[error("Invalid request/URI: {message}")]
    Validation {
        /// Human-readable explanation of what was invalid.
        message: String,
    },

    /// JSON encoding failed when preparing a request body. Raised before any
    /// network activity takes place.
    #[error("JSON encode error: {message}")]
    EncodeJson {
        /// Error message from the JSON serializer.
        message: String,
    },

    /// JSON decoding failed when parsing a server response.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer (with context if available).
        message: String,
    },
}

// --- Token Persistence Error ---

/// Errors originating from the bearer-token persistence store.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Reading from or writing to the underlying store failed.
    #[error("token store I/O failed: {0}")]
    Store(#[from] std::io::Error),
}

// --- Socket Error ---

/// Errors originating from the raw TCP socket wrapper.
#[derive(Debug, Error)]
pub enum SocketError {
    /// The manager has no live connection; call `connect()` first.
    #[error("socket is not connected")]
    NotConnected,

    /// Connecting, writing, or shutting down the stream failed.
    #[error("socket I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// --- WebSocket Error ---

/// Errors originating from the WebSocket wrapper.
#[derive(Debug, Error)]
pub enum WebSocketError {
    /// The manager has no live connection; call `connect()` first.
    #[error("WebSocket is not connected")]
    NotConnected,

    /// Handshake or framing failure from tungstenite.
    #[error("WebSocket protocol error: {0}")]
    Protocol(#[from] tokio_tungstenite::tungstenite::Error),
}

/// A specialized `Result` type for `hinet` operations.
pub type Result<T> = std::result::Result<T, Error>;

// Ergonomic "Staircase" From Implementations ---
// A macro to reduce boilerplate for converting base errors into the top-level Error.
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

// Request Errors
impl_from_for_error!(reqwest::Error, Error::Request);

// WebSocket Errors
impl_from_for_error!(tokio_tungstenite::tungstenite::Error, Error::WebSocket);
