//! `hrms-app` — composition root of the HRMS client.
//!
//! Wires configuration, the session store, the navigator and the API client
//! into one explicitly owned [`AppContext`].

pub mod config;
pub mod context;

pub use config::{AppConfig, ConfigError};
pub use context::{AppContext, AppError};
