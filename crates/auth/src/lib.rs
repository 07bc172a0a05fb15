//! `hrms-auth` — session state, its persistence, and role-based authorization.
//!
//! This crate is intentionally decoupled from routing and HTTP: it owns the
//! answer to "who is signed in and what may they see", nothing else.

pub mod authorize;
pub mod roles;
pub mod session;
pub mod storage;
pub mod store;

pub use authorize::{authorize_portal, AuthzError, Portal};
pub use roles::{RoleClass, ADMIN_CLASS_ROLES};
pub use session::SessionState;
pub use storage::{JsonFileStorage, MemoryStorage, SessionStorage, StorageError, StorageWrite};
pub use store::{SessionError, SessionStore};
