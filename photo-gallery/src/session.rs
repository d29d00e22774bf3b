//! Authentication token persistence and the process-scoped session handle
//!
//! The token is opaque: nothing here inspects its shape or expiry. Whether it
//! is still valid is only learned from the service's answer to the next call.

use crate::schema::init_storage_schema;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Fixed storage key of the authentication token
pub const TOKEN_STORAGE_KEY: &str = "userToken";

/// Errors from the local token storage
#[derive(Debug)]
pub enum SessionError {
    DatabaseError(rusqlite::Error),
    IoError(std::io::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::DatabaseError(e) => write!(f, "Session storage error: {}", e),
            SessionError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<rusqlite::Error> for SessionError {
    fn from(err: rusqlite::Error) -> Self {
        SessionError::DatabaseError(err)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::IoError(err)
    }
}

/// Durable storage for a single authentication token
pub trait TokenStore: Send {
    fn get(&self) -> Result<Option<String>, SessionError>;
    fn set(&self, token: &str) -> Result<(), SessionError>;
    /// Remove the token; clearing an empty store is not an error
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token store backed by a SQLite key/value table
pub struct SqliteTokenStore {
    conn: Connection,
}

impl SqliteTokenStore {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, SessionError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, SessionError> {
        init_storage_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl TokenStore for SqliteTokenStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let token = self
            .conn
            .query_row(
                "SELECT value FROM key_value_store WHERE key = ?1",
                params![TOKEN_STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(token)
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        self.conn.execute(
            "INSERT INTO key_value_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![TOKEN_STORAGE_KEY, token],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.conn.execute(
            "DELETE FROM key_value_store WHERE key = ?1",
            params![TOKEN_STORAGE_KEY],
        )?;
        Ok(())
    }
}

/// In-memory token store, lost on restart
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot().clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: Option<String>,
}

/// Process-scoped authentication session
///
/// Created once at app start with [`Session::init`], which loads the persisted
/// token, and handed to everything that issues authenticated calls. Clones
/// share the same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionInner>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Session {
    /// Load the persisted token (if any) and start the session
    pub fn init(store: impl TokenStore + 'static) -> Result<Self, SessionError> {
        let token = store.get()?;
        log::debug!(
            "Session initialized ({})",
            if token.is_some() {
                "token restored"
            } else {
                "no token"
            }
        );
        Ok(Self {
            inner: Arc::new(Mutex::new(SessionInner {
                store: Box::new(store),
                token,
            })),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current token, `None` when logged out
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Persist a freshly issued token
    pub fn begin(&self, token: &str) -> Result<(), SessionError> {
        let mut inner = self.lock();
        inner.store.set(token)?;
        inner.token = Some(token.to_string());
        log::info!("Session started");
        Ok(())
    }

    /// Destroy the token locally and in storage; idempotent
    ///
    /// The in-memory token is dropped even if storage fails, so the current
    /// process never keeps using a token the caller asked to discard.
    pub fn teardown(&self) -> Result<(), SessionError> {
        let mut inner = self.lock();
        let was_active = inner.token.take().is_some();
        inner.store.clear()?;
        if was_active {
            log::info!("Session ended");
        }
        Ok(())
    }
}
