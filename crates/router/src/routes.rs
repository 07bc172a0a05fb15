//! Route descriptors and the application's route catalogue.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hrms_auth::Portal;

/// Name of the sign-in page.
pub const LOGIN: &str = "login";
/// Landing page for signed-in users.
pub const HOME: &str = "home";
/// Catch-all page shown for unknown paths and denied admin pages.
pub const FORBIDDEN: &str = "error.forbidden";

/// Unique route identifier, e.g. `"user-profile"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteName(Cow<'static, str>);

impl RouteName {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RouteName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for RouteName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for RouteName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePath {
    /// Matches one normalized path, e.g. `/admin/users`.
    Exact(Cow<'static, str>),
    /// Matches anything no exact route matched.
    CatchAll,
}

/// A navigable route.
///
/// Every route carries exactly one portal classification; routes declared
/// without one are `Portal::All`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: RouteName,
    pub path: RoutePath,
    pub title: Option<Cow<'static, str>>,
    pub portal: Portal,
}

impl RouteDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        path: impl Into<Cow<'static, str>>,
        portal: Portal,
    ) -> Self {
        Self {
            name: RouteName::new(name),
            path: RoutePath::Exact(normalize_owned(path.into())),
            title: None,
            portal,
        }
    }

    pub fn catch_all(name: impl Into<Cow<'static, str>>, portal: Portal) -> Self {
        Self {
            name: RouteName::new(name),
            path: RoutePath::CatchAll,
            title: None,
            portal,
        }
    }

    pub fn with_title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_login(&self) -> bool {
        self.name == LOGIN
    }

    fn matches(&self, normalized: &str) -> bool {
        match &self.path {
            RoutePath::Exact(path) => path.eq_ignore_ascii_case(normalized),
            RoutePath::CatchAll => false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("more than one catch-all route")]
    MultipleCatchAll,

    #[error("required route '{0}' is missing")]
    MissingRoute(&'static str),
}

/// Validated set of routes.
///
/// # Invariants
/// - Names are unique, exact paths are unique (case-insensitively).
/// - At most one catch-all route.
/// - `login`, `home` and `error.forbidden` exist, so guard redirects always
///   have somewhere to land.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        let mut catch_all = false;

        for route in &routes {
            if !names.insert(route.name.as_str()) {
                return Err(RouteTableError::DuplicateName(route.name.to_string()));
            }
            match &route.path {
                RoutePath::Exact(path) => {
                    if !paths.insert(path.to_ascii_lowercase()) {
                        return Err(RouteTableError::DuplicatePath(path.to_string()));
                    }
                }
                RoutePath::CatchAll if catch_all => return Err(RouteTableError::MultipleCatchAll),
                RoutePath::CatchAll => catch_all = true,
            }
        }

        for required in [LOGIN, HOME, FORBIDDEN] {
            if !names.contains(required) {
                return Err(RouteTableError::MissingRoute(required));
            }
        }

        Ok(Self { routes })
    }

    /// The HRMS application's routes.
    pub fn hrms() -> Self {
        let mut routes = vec![
            RouteDescriptor::new(HOME, "/", Portal::All).with_title("Home"),
            RouteDescriptor::new(LOGIN, "/login", Portal::All).with_title("Login"),
        ];
        routes.extend(user_routes());
        routes.extend(admin_routes());
        routes.push(RouteDescriptor::catch_all(FORBIDDEN, Portal::All).with_title("404 Not Found"));

        Self { routes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Resolve a location such as `/admin/users/?page=2#top`.
    ///
    /// Query, fragment and trailing slash are ignored, matching is
    /// case-insensitive, and unmatched paths fall through to the catch-all.
    pub fn resolve(&self, location: &str) -> Option<&RouteDescriptor> {
        let normalized = normalize(location);
        self.routes
            .iter()
            .find(|r| r.matches(&normalized))
            .or_else(|| self.routes.iter().find(|r| r.path == RoutePath::CatchAll))
    }
}

/// Self-service pages for every signed-in employee.
fn user_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("user-profile", "/user/profile", Portal::All).with_title("User Profile"),
        RouteDescriptor::new("user-leaves", "/user/leaves", Portal::All).with_title("User Leaves"),
        RouteDescriptor::new("user-attendance", "/user/attendance", Portal::All)
            .with_title("User Attendance"),
        RouteDescriptor::new("user-payroll", "/user/payroll", Portal::All).with_title("User Payroll"),
    ]
}

fn admin_routes() -> Vec<RouteDescriptor> {
    [
        ("dashboard", "/admin/dashboard", "Dashboard"),
        ("users-list", "/admin/users", "User List"),
        ("create-user", "/admin/users/create", "Create User"),
        ("roles", "/admin/roles", "Role Management"),
        ("departments", "/admin/departments", "Department Management"),
        ("employees-list", "/admin/employees", "Employee List"),
        ("create-employee", "/admin/employees/create", "Create Employee"),
        ("attendances", "/admin/attendances", "Attendance Management"),
        ("leaves", "/admin/leaves", "Leave Management"),
        ("payrolls", "/admin/payrolls", "Payroll Management"),
    ]
    .into_iter()
    .map(|(name, path, title)| RouteDescriptor::new(name, path, Portal::Admin).with_title(title))
    .collect()
}

fn normalize(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn normalize_owned(path: Cow<'static, str>) -> Cow<'static, str> {
    let normalized = normalize(&path);
    if normalized == path {
        path
    } else {
        Cow::Owned(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrms_catalogue_passes_validation() {
        let table = RouteTable::hrms();
        let validated = RouteTable::new(table.iter().cloned().collect()).unwrap();
        assert_eq!(validated.iter().count(), 17);
    }

    #[test]
    fn every_admin_path_is_admin_portal() {
        let table = RouteTable::hrms();
        for route in table.iter() {
            if let RoutePath::Exact(path) = &route.path {
                assert_eq!(
                    path.starts_with("/admin"),
                    route.portal == Portal::Admin,
                    "route {}",
                    route.name
                );
            }
        }
    }

    #[test]
    fn resolve_ignores_query_fragment_trailing_slash_and_case() {
        let table = RouteTable::hrms();
        for location in ["/admin/users", "/admin/users/", "/Admin/Users?page=2", "admin/users#top"] {
            assert_eq!(table.resolve(location).unwrap().name, "users-list", "{location}");
        }
        assert_eq!(table.resolve("").unwrap().name, HOME);
        assert_eq!(table.resolve("/?x=1").unwrap().name, HOME);
    }

    #[test]
    fn unknown_paths_fall_through_to_catch_all() {
        let table = RouteTable::hrms();
        let route = table.resolve("/no/such/page").unwrap();
        assert_eq!(route.name, FORBIDDEN);
        assert_eq!(route.title.as_deref(), Some("404 Not Found"));
        assert_eq!(table.resolve("/admin").unwrap().name, FORBIDDEN);
    }

    #[test]
    fn table_rejects_duplicates_and_missing_landing_routes() {
        let base = || {
            vec![
                RouteDescriptor::new(HOME, "/", Portal::All),
                RouteDescriptor::new(LOGIN, "/login", Portal::All),
                RouteDescriptor::catch_all(FORBIDDEN, Portal::All),
            ]
        };

        assert!(RouteTable::new(base()).is_ok());

        let mut dup_name = base();
        dup_name.push(RouteDescriptor::new(HOME, "/other", Portal::All));
        assert_eq!(
            RouteTable::new(dup_name).unwrap_err(),
            RouteTableError::DuplicateName("home".into())
        );

        let mut dup_path = base();
        dup_path.push(RouteDescriptor::new("other", "/LOGIN/", Portal::All));
        assert!(matches!(RouteTable::new(dup_path), Err(RouteTableError::DuplicatePath(_))));

        let mut two_catch_alls = base();
        two_catch_alls.push(RouteDescriptor::catch_all("not-found", Portal::All));
        assert_eq!(
            RouteTable::new(two_catch_alls).unwrap_err(),
            RouteTableError::MultipleCatchAll
        );

        let no_login: Vec<_> = base().into_iter().filter(|r| !r.is_login()).collect();
        assert_eq!(
            RouteTable::new(no_login).unwrap_err(),
            RouteTableError::MissingRoute(LOGIN)
        );
    }
}
