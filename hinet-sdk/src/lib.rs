#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod errors;
mod global;
mod rest;
mod socket;
mod token;
mod util;
mod websocket;

pub mod prelude;

// --- PUBLIC API EXPORTS ---
// REST pipeline
pub use rest::core::{RestClient, RestClientBuilder};
pub use rest::endpoint::{Endpoint, HttpMethod};
pub use rest::envelope::{ApiRequest, ApiResponse};
pub use rest::verbs::Params;

// Token lifecycle
pub use token::{FileTokenStore, MemoryTokenStore, TokenProvider, TokenStore};

// Socket and WebSocket wrappers
pub use socket::SocketManager;
pub use websocket::{WebSocketListener, WebSocketManager};

// Error and global client
pub use errors::{BuildError, Error, Result};
pub use global::{drop_global_client, global_client, set_global_client};

// Re-exports
pub use reqwest::{Response, StatusCode};
