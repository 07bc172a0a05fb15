use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{RoleClass, SessionState};

/// Authorization tier a route requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    /// Any authenticated session (and, for the login page, anonymous ones).
    #[default]
    All,
    /// Admin-class roles only.
    Admin,
}

impl core::fmt::Display for Portal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Portal::All => f.write_str("all"),
            Portal::Admin => f.write_str("admin"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden: portal '{0}' requires an admin-class role")]
    Forbidden(Portal),
}

/// Decide whether a session may enter a portal.
///
/// - No IO
/// - No panics
/// - Fails closed: a session without a user, or whose user has no or an
///   unknown role, is never admin-class.
///
/// `Portal::All` is open to every session here; whether a page needs a
/// signed-in user at all is a routing concern.
pub fn authorize_portal(session: &SessionState, portal: Portal) -> Result<(), AuthzError> {
    match portal {
        Portal::All => Ok(()),
        Portal::Admin => {
            if !session.is_authenticated() {
                return Err(AuthzError::Unauthenticated);
            }
            if RoleClass::of(session.role_id()).is_admin() {
                Ok(())
            } else {
                Err(AuthzError::Forbidden(portal))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_core::{RoleId, UserId};
    use hrms_models::User;

    fn session_with_role(role: Option<i64>) -> SessionState {
        let user = User::new(UserId::new(1), "tester", role.map(RoleId::new));
        SessionState::authenticated(user, "token").unwrap()
    }

    #[test]
    fn admin_portal_requires_admin_class_role() {
        assert_eq!(authorize_portal(&session_with_role(Some(1)), Portal::Admin), Ok(()));
        assert_eq!(authorize_portal(&session_with_role(Some(2)), Portal::Admin), Ok(()));
        assert_eq!(
            authorize_portal(&session_with_role(Some(3)), Portal::Admin),
            Err(AuthzError::Forbidden(Portal::Admin))
        );
        assert_eq!(
            authorize_portal(&session_with_role(None), Portal::Admin),
            Err(AuthzError::Forbidden(Portal::Admin))
        );
    }

    #[test]
    fn anonymous_session_is_unauthenticated_for_admin_portal() {
        let anonymous = SessionState::anonymous();
        assert_eq!(authorize_portal(&anonymous, Portal::Admin), Err(AuthzError::Unauthenticated));
        assert_eq!(authorize_portal(&anonymous, Portal::All), Ok(()));
    }

    #[test]
    fn portal_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Portal::Admin).unwrap(), "\"admin\"");
        let all: Portal = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, Portal::All);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every role outside {1, 2} is refused the admin portal.
            #[test]
            fn non_admin_roles_are_forbidden(role in any::<i64>().prop_filter("admin-class", |r| *r != 1 && *r != 2)) {
                let session = session_with_role(Some(role));
                prop_assert_eq!(
                    authorize_portal(&session, Portal::Admin),
                    Err(AuthzError::Forbidden(Portal::Admin))
                );
            }
        }
    }
}
