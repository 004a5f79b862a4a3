//! Common imports for quick starts.

// Common
pub use crate::{BuildError, Error, Result};

// Transport
pub use crate::{RestClient, RestClientBuilder};

// REST model
pub use crate::{ApiRequest, ApiResponse, Endpoint, HttpMethod, Params};

// Token lifecycle
pub use crate::{FileTokenStore, MemoryTokenStore, TokenProvider, TokenStore};

// Socket and WebSocket wrappers
pub use crate::{SocketManager, WebSocketListener, WebSocketManager};

// Shared default client
pub use crate::{drop_global_client, global_client, set_global_client};
