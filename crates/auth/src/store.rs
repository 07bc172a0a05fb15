//! Session store: the owned session state plus its durable mirror.

use thiserror::Error;

use hrms_models::User;

use crate::session::SessionState;
use crate::storage::{
    SessionStorage, StorageError, StorageWrite, KEY_IS_AUTHENTICATED, KEY_TOKEN, KEY_USER,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("bearer token must not be empty")]
    EmptyToken,

    #[error("failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the [`SessionState`] and keeps the storage mirror in step with it.
///
/// There is exactly one store per application context; consumers borrow the
/// state through [`SessionStore::state`]. Mutations take `&mut self`, so a
/// login or logout always completes before the next navigation reads it.
#[derive(Debug)]
pub struct SessionStore<S> {
    state: SessionState,
    storage: S,
    message: Option<String>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Rebuild the session from storage.
    ///
    /// Fails closed: unless the flag reads `"true"` and both a decodable user
    /// and a non-empty token are present, the session is anonymous and any
    /// leftover entries are scrubbed.
    pub fn rehydrate(mut storage: S) -> Self {
        let state = match read_persisted(&storage) {
            Ok(Some(state)) => state,
            Ok(None) => SessionState::anonymous(),
            Err(reason) => {
                tracing::warn!(%reason, "persisted session rejected; starting anonymous");
                if let Err(err) = storage.apply(&cleared_writes()) {
                    tracing::error!(error = %err, "failed to scrub rejected session");
                }
                SessionState::anonymous()
            }
        };

        tracing::debug!(authenticated = state.is_authenticated(), "session rehydrated");

        Self {
            state,
            storage,
            message: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Sign in. The mirror is written first; if that fails the in-memory
    /// session is left as it was.
    pub fn login(
        &mut self,
        user: User,
        token: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), SessionError> {
        let token = token.into();
        let user_json = serde_json::to_string(&user)?;
        let next = SessionState::authenticated(user, token.clone())?;

        self.storage.apply(&[
            StorageWrite::set(KEY_USER, user_json),
            StorageWrite::set(KEY_TOKEN, token),
            StorageWrite::set(KEY_IS_AUTHENTICATED, "true"),
        ])?;

        tracing::info!(user_id = ?next.user_id(), role_id = ?next.role_id(), "signed in");
        self.state = next;
        self.message = Some(message.into());
        Ok(())
    }

    /// Sign out. The in-memory session is cleared unconditionally; the
    /// returned error only reports a failure to update the mirror.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let user_id = self.state.user_id();
        self.state = SessionState::anonymous();
        self.message = None;

        self.storage.apply(&cleared_writes())?;
        tracing::info!(?user_id, "signed out");
        Ok(())
    }

    /// Welcome message left by the last login; returned once.
    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }
}

fn cleared_writes() -> [StorageWrite; 3] {
    [
        StorageWrite::set(KEY_IS_AUTHENTICATED, "false"),
        StorageWrite::remove(KEY_USER),
        StorageWrite::remove(KEY_TOKEN),
    ]
}

/// `Ok(None)`: cleanly signed out. `Err`: something is there but unusable.
fn read_persisted<S: SessionStorage>(storage: &S) -> Result<Option<SessionState>, String> {
    let flag = storage.get(KEY_IS_AUTHENTICATED).map_err(|e| e.to_string())?;
    let user = storage.get(KEY_USER).map_err(|e| e.to_string())?;
    let token = storage.get(KEY_TOKEN).map_err(|e| e.to_string())?;

    if flag.as_deref() != Some("true") {
        if user.is_some() || token.is_some() {
            return Err("stale user/token entries without an authenticated flag".to_string());
        }
        return Ok(None);
    }

    let user = user.ok_or("authenticated flag set but user entry missing")?;
    let user: User = serde_json::from_str(&user).map_err(|e| format!("corrupt user entry: {e}"))?;
    let token = token.ok_or("authenticated flag set but token entry missing")?;

    SessionState::authenticated(user, token)
        .map(Some)
        .map_err(|e| e.to_string())
}
