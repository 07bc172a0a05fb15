//! `hrms-router` — route catalogue, navigation guard and navigator.
//!
//! The guard is a pure function from (target, current, session) to a
//! decision; the [`Navigator`] is the only thing that acts on decisions.

pub mod guard;
pub mod navigation;
pub mod routes;

pub use guard::{evaluate, GuardDecision};
pub use navigation::{Navigation, NavigationError, Navigator, DEFAULT_APP_NAME};
pub use routes::{RouteDescriptor, RouteName, RoutePath, RouteTable, RouteTableError};
