//! Navigator: applies guard decisions and tracks the current page.

use serde::Serialize;
use thiserror::Error;

use hrms_auth::SessionState;

use crate::guard::{evaluate, GuardDecision};
use crate::routes::{RouteDescriptor, RouteName, RouteTable};

/// Title used for pages that do not declare one.
pub const DEFAULT_APP_NAME: &str = "HRMS Application";

/// Redirect chains longer than this are treated as loops.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("redirect loop: {}", .0.iter().map(RouteName::as_str).collect::<Vec<_>>().join(" -> "))]
    RedirectLoop(Vec<RouteName>),
}

/// Result of a completed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Route the caller asked for.
    pub requested: RouteName,
    /// Route that was actually committed.
    pub route: RouteName,
    /// Redirects followed, in order, starting with `requested`.
    pub redirects: Vec<RouteName>,
    /// Resolved display title of `route`.
    pub title: String,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Owns the route table and the current location.
#[derive(Debug, Clone)]
pub struct Navigator {
    routes: RouteTable,
    app_name: String,
    current: Option<RouteName>,
    title: String,
}

impl Navigator {
    pub fn new(routes: RouteTable, app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            routes,
            title: app_name.clone(),
            app_name,
            current: None,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Committed route, `None` before the first navigation.
    pub fn current(&self) -> Option<&RouteDescriptor> {
        self.current.as_ref().and_then(|name| self.routes.by_name(name.as_str()))
    }

    /// Title of the current page.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declared title of `route`, or the application name.
    pub fn resolve_title(&self, route: &RouteDescriptor) -> String {
        route
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.app_name)
            .to_string()
    }

    /// Navigate to a location such as `/admin/users`.
    pub fn push_path(
        &mut self,
        location: &str,
        session: &SessionState,
    ) -> Result<Navigation, NavigationError> {
        let target = self
            .routes
            .resolve(location)
            .ok_or_else(|| NavigationError::UnknownRoute(location.to_string()))?
            .name
            .clone();
        self.run(target, session)
    }

    /// Navigate to a route by name.
    pub fn push_name(
        &mut self,
        name: &str,
        session: &SessionState,
    ) -> Result<Navigation, NavigationError> {
        let target = self
            .routes
            .by_name(name)
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?
            .name
            .clone();
        self.run(target, session)
    }

    fn run(
        &mut self,
        requested: RouteName,
        session: &SessionState,
    ) -> Result<Navigation, NavigationError> {
        let mut name = requested.clone();
        let mut redirects = Vec::new();

        let title = loop {
            let target = self
                .routes
                .by_name(name.as_str())
                .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?;

            match evaluate(target, self.current(), session) {
                GuardDecision::Allow => break self.resolve_title(target),
                GuardDecision::Redirect(next) => {
                    redirects.push(name);
                    if redirects.len() > MAX_REDIRECTS {
                        return Err(NavigationError::RedirectLoop(redirects));
                    }
                    name = next;
                }
            }
        };

        tracing::debug!(requested = %requested, route = %name, %title, "navigation committed");
        self.current = Some(name.clone());
        self.title.clone_from(&title);

        Ok(Navigation {
            requested,
            route: name,
            redirects,
            title,
        })
    }
}
