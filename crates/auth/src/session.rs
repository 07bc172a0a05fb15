//! In-memory session state.

use hrms_core::{RoleId, UserId};
use hrms_models::User;

use crate::store::SessionError;

#[derive(Debug, Clone, PartialEq)]
struct Credentials {
    user: User,
    token: String,
}

/// Authentication status, current user and bearer token.
///
/// # Invariants
/// - Authenticated iff both a user and a non-empty token are present; the two
///   are stored together so a half-populated session cannot be constructed.
/// - This is a pure data holder. Persisting it is [`crate::SessionStore`]'s job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    credentials: Option<Credentials>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self {
            credentials: Some(Credentials { user, token }),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|u| u.id)
    }

    /// Role of the signed-in user, if any.
    pub fn role_id(&self) -> Option<RoleId> {
        self.user().and_then(|u| u.role_id)
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }
}
