//! `hrms-client` — thin bearer-authenticated wrappers over the HRMS REST API.
//!
//! The API is the authority for everything; these wrappers only build
//! requests, attach the session token and decode the documented shapes.

pub mod api;
pub mod attendance;

pub use api::{ApiClient, ApiResponse, ClientError};
pub use attendance::{AttendanceService, CheckInError, CheckInPhoto, CheckInSubmission};
