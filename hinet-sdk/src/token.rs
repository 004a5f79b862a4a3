//! Bearer-token lifecycle: an in-process slot mirrored into a persistence store.
//!
//! The token is a process-lifetime credential, not a per-request one: setting
//! it affects every request built afterwards, clearing it removes the
//! `Authorization` header from subsequent requests. Instead of a hidden
//! global, the slot lives in an explicit [`TokenProvider`] that is handed to
//! the [`RestClient`](crate::RestClient) at construction, so concurrent
//! sessions and tests stay isolated.
//!
//! Treat the token as a **bearer secret**. Do not log it; the provider's
//! `Debug` output is redacted for that reason.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

use crate::errors::TokenError;

/// Store key under which the bearer token is persisted.
const TOKEN_KEY: &str = "bearer_token";

/// Opaque key-value string persistence for credentials.
///
/// The provider only ever uses three operations; everything else (format,
/// location, encryption) is the implementor's business. All operations are
/// fallible with `std::io::Error` as the common denominator.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Persist `value` under `key`, overwriting any previous value.
    fn put(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove the value stored under `key`. Removing an absent key is not an
    /// error.
    fn remove(&self, key: &str) -> io::Result<()>;

    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> io::Result<Option<String>>;
}

/// Process-memory [`TokenStore`], the default for a freshly built client.
///
/// Nothing survives the process; useful for tests and for apps that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn put(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .expect("token store poisoned")
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries
            .lock()
            .expect("token store poisoned")
            .remove(key);
        Ok(())
    }

    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("token store poisoned")
            .get(key)
            .cloned())
    }
}

/// File-backed [`TokenStore`]: one plain-text file per key under a directory.
///
/// On Unix, written files get permissions `600`. The directory is created on
/// first write.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use hinet::{FileTokenStore, RestClient};
///
/// let store = Arc::new(FileTokenStore::new("/var/lib/myapp/credentials"));
/// let client = RestClient::builder().token_store(store).build()?;
/// # Ok::<_, hinet::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at `dir`. The directory does not need to exist
    /// yet.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStore for FileTokenStore {
    fn put(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value.trim().to_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

struct TokenInner {
    /// Lock-free slot read by every request build.
    slot: ArcSwapOption<String>,
    store: Arc<dyn TokenStore>,
}

/// Single-slot bearer-token holder with a persistence mirror.
///
/// At most one token is active at a time. [`TokenProvider::set`] persists the
/// value and publishes it to the in-process slot; [`TokenProvider::clear`]
/// removes it from both. Reads ([`TokenProvider::current`]) are lock-free and
/// happen on every request the [`RestClient`](crate::RestClient) builds.
///
/// Construction rehydrates the slot from the store, so a token persisted by a
/// previous process is attached again without an explicit `set`.
///
/// Cloning is cheap; clones share the same slot and store.
#[derive(Clone)]
pub struct TokenProvider {
    inner: Arc<TokenInner>,
}

impl TokenProvider {
    /// Create a provider mirrored into `store`, rehydrating any persisted
    /// token into the in-process slot.
    pub fn new(store: Arc<dyn TokenStore>) -> Result<Self, TokenError> {
        let persisted = store.get(TOKEN_KEY)?;
        Ok(Self {
            inner: Arc::new(TokenInner {
                slot: ArcSwapOption::from(persisted.map(Arc::new)),
                store,
            }),
        })
    }

    /// Create a provider with no persistence beyond process memory.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(TokenInner {
                slot: ArcSwapOption::from(None),
                store: Arc::new(MemoryTokenStore::new()),
            }),
        }
    }

    /// Set the bearer token: persist it, then publish it to the slot.
    ///
    /// All requests built after this call carry `Authorization: Bearer <token>`.
    pub fn set(&self, token: &str) -> Result<(), TokenError> {
        self.inner.store.put(TOKEN_KEY, token)?;
        self.inner.slot.store(Some(Arc::new(token.to_owned())));
        Ok(())
    }

    /// Clear the bearer token from the slot and the store.
    ///
    /// Requests built after this call omit the `Authorization` header.
    pub fn clear(&self) -> Result<(), TokenError> {
        self.inner.store.remove(TOKEN_KEY)?;
        self.inner.slot.store(None);
        Ok(())
    }

    /// The currently active token, if any.
    pub fn current(&self) -> Option<String> {
        self.inner.slot.load_full().map(|t| t.as_ref().clone())
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("token", &self.current().map(|_| "<redacted>"))
            .field("store", &self.inner.store)
            .finish()
    }
}
