//! Auth Session Service
//!
//! Login state for the admin console, persisted across sessions through an
//! external [`SessionStore`] under a fixed namespace key. The editing core
//! never reads or writes this; hosts gate the editor screens on
//! [`AuthService::is_authenticated`].
//!
//! Credentials are the console's fixed admin pair; there is no user
//! database behind this.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace key the session record is persisted under.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin";

/// Auth operation errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// The supplied credential pair was rejected. Nothing is persisted.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The session store failed to load or persist the record.
    #[error("Session storage failed: {0}")]
    Storage(String),
}

impl AuthError {
    /// Create a Storage error
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }
}

/// External key-value storage the session record persists through.
///
/// Hosts back this with whatever storage they have (browser local storage,
/// a config file); tests use an in-memory map.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the raw record stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Persist `value` under `key`, replacing any previous record.
    async fn store(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Remove the record under `key`, if any.
    async fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// The signed-in user, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// The persisted session record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

/// Auth service over a persisted session record.
///
/// # Examples
///
/// ```no_run
/// # use fieldnote_core::services::{AuthService, SessionStore};
/// # async fn example<P: SessionStore>(store: P) -> Result<(), Box<dyn std::error::Error>> {
/// let mut auth = AuthService::restore(store).await?;
/// if !auth.is_authenticated() {
///     auth.login("admin", "admin").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AuthService<P> {
    store: P,
    session: AuthSession,
}

impl<P: SessionStore> AuthService<P> {
    /// Construct the service, restoring a previously persisted session if
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` when the store cannot be read or holds
    /// a record that does not parse.
    pub async fn restore(store: P) -> Result<Self, AuthError> {
        let session = match store.load(AUTH_STORAGE_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|err| AuthError::storage(err.to_string()))?
            }
            None => AuthSession::default(),
        };
        Ok(Self { store, session })
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.user.as_ref()
    }

    /// Verify the credential pair and persist the signed-in session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` without touching storage when the pair
    /// is rejected, and `Storage` when persisting fails.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            tracing::debug!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let session = AuthSession {
            is_authenticated: true,
            user: Some(AuthUser {
                username: username.to_string(),
                avatar: None,
            }),
        };
        // Persist first; the in-memory session only changes once the record
        // is durable.
        let raw = serde_json::to_string(&session)
            .map_err(|err| AuthError::storage(err.to_string()))?;
        self.store.store(AUTH_STORAGE_KEY, &raw).await?;
        self.session = session;
        tracing::info!(username, "signed in");
        Ok(())
    }

    /// Clear the session and persist the signed-out state.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(AUTH_STORAGE_KEY).await?;
        self.session = AuthSession::default();
        tracing::info!("signed out");
        Ok(())
    }
}
