//! Global, resettable [`RestClient`] for zero-setup usage.
//!
//! Most applications want a single shared client (one connection pool, one
//! token slot) without passing a `RestClient` everywhere. This module holds a
//! process-wide, lazily initialized, resettable default that convenience code
//! can reuse. Explicit construction via [`RestClient::builder`] remains
//! first-class; long-lived services juggling several configurations should
//! prefer it.
//!
//! - Backing storage is an `ArcSwapOption<RestClient>` inside a `OnceLock`.
//! - **Reads are lock-free**; [`global_client`] does a single atomic load and
//!   returns a cheap clone of the current client.
//! - **Reset is safe**; [`set_global_client`]/[`drop_global_client`] publish a
//!   new instance (or `None`). Existing clones keep working independently.
//! - **Init is fallible** and returns [`BuildError`] instead of panicking.
//!
//! If multiple threads race the first [`global_client`] call, more than one
//! client may be constructed; the last stored wins and the others are
//! dropped. Tests should call [`drop_global_client`] between cases, or inject
//! a deterministic client with [`set_global_client`].
//!
//! # Examples
//! ```
//! # use hinet::{global_client, set_global_client, RestClient};
//! let client = global_client()?;
//! // Subsequent calls return cheap clones of the same underlying client:
//! let same_again = global_client()?;
//!
//! // Override globally:
//! let custom = RestClient::builder().build()?;
//! set_global_client(custom);
//! # Ok::<(), hinet::BuildError>(())
//! ```

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::sync::OnceLock;

use crate::{BuildError, RestClient};

/// Process-wide slot for the optional default client.
///
/// Initialized on first use; may be replaced or cleared at runtime.
/// Lock-free loads; last-writer-wins stores.
static GLOBAL_CLIENT: OnceLock<ArcSwapOption<RestClient>> = OnceLock::new();

#[inline]
fn slot() -> &'static ArcSwapOption<RestClient> {
    GLOBAL_CLIENT.get_or_init(|| ArcSwapOption::from(None))
}

/// Get-or-init the process-wide default client.
///
/// Returns a **clone** of the current default [`RestClient`]. Clones are
/// cheap and share the connection pool and token slot.
///
/// - On first use, constructs via [`RestClient::new`].
/// - Subsequent calls are lock-free and just clone the current instance.
/// - Clones remain valid even after [`set_global_client`] or
///   [`drop_global_client`].
pub fn global_client() -> Result<RestClient, BuildError> {
    if let Some(current) = slot().load_full() {
        // Clone the inner client; dropping this Arc only decrements the refcount.
        return Ok(current.as_ref().clone());
    }

    // Initialize a fresh one and publish it, racing safely with other initializers.
    let fresh = RestClient::new()?;
    slot().store(Some(Arc::new(fresh.clone())));
    Ok(fresh)
}

/// Replace the global default client.
///
/// Publishes `new_client` atomically. Existing handles continue to use the
/// previous client until they are dropped.
pub fn set_global_client(new_client: RestClient) {
    slot().store(Some(Arc::new(new_client)));
}

/// Clear the global default client.
///
/// After this call, the next [`global_client`] will lazily construct a fresh
/// client. Existing handles remain valid.
pub fn drop_global_client() {
    slot().store(None);
}
