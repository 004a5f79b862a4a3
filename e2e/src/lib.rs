//! End-to-end tests for the `hinet` wrappers, run against throwaway local
//! servers: an `httpmock` HTTP server, a `tokio` TCP listener, and a
//! `tokio-tungstenite` echo server.

#[cfg(test)]
mod tests;
