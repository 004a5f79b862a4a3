//! The REST request/response pipeline: endpoint model, generic envelopes,
//! and the asynchronous executor.

pub mod core;
pub mod endpoint;
pub mod envelope;
pub mod verbs;
