//! Navigation guard.

use hrms_auth::{authorize_portal, SessionState};

use crate::routes::{RouteDescriptor, RouteName, FORBIDDEN, HOME, LOGIN};

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(RouteName),
}

impl GuardDecision {
    fn redirect(name: &'static str) -> Self {
        Self::Redirect(RouteName::new(name))
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Decide whether navigating to `target` may proceed.
///
/// Rules, first match wins:
/// 1. anonymous session, target is not the login page: go to login
/// 2. signed-in session, target is the login page: go home
/// 3. admin-portal target: allowed for admin-class roles, otherwise forbidden
/// 4. anything else is allowed
///
/// Pure: reads only its arguments and returns the same decision for the same
/// inputs. Acting on the decision is the caller's job.
pub fn evaluate(
    target: &RouteDescriptor,
    current: Option<&RouteDescriptor>,
    session: &SessionState,
) -> GuardDecision {
    let authenticated = session.is_authenticated();

    let decision = if !target.is_login() && !authenticated {
        GuardDecision::redirect(LOGIN)
    } else if target.is_login() && authenticated {
        GuardDecision::redirect(HOME)
    } else if authorize_portal(session, target.portal).is_err() {
        GuardDecision::redirect(FORBIDDEN)
    } else {
        GuardDecision::Allow
    };

    match &decision {
        GuardDecision::Allow => tracing::trace!(
            to = %target.name,
            from = current.map(|r| r.name.as_str()),
            "navigation allowed"
        ),
        GuardDecision::Redirect(next) => tracing::debug!(
            to = %target.name,
            from = current.map(|r| r.name.as_str()),
            redirect = %next,
            role_id = ?session.role_id(),
            "navigation redirected"
        ),
    }

    decision
}
