//! `hrms-models` — typed shapes of the records the HRMS backend returns.
//!
//! These are transport models: they mirror the JSON the API sends and carry
//! only small derived helpers. Authorization and attendance policy live in
//! their own crates.

pub mod attendance;
pub mod leave;
pub mod money;
pub mod organization;
pub mod payroll;
pub mod user;

pub use attendance::{Attendance, Office};
pub use leave::Leave;
pub use money::{format_idr, format_idr_str};
pub use organization::{Department, RoleRecord};
pub use payroll::{Payroll, PayrollStatus, Salary};
pub use user::{DepartmentRef, Employee, User};
