//! `hrms-attendance` — geolocation rules for attendance check-in.
//!
//! Pure computation only: no I/O, no clocks. The API client decides when to
//! call into it.

pub mod geo;
pub mod office;

pub use geo::{haversine_distance, Coordinates, GeoError, EARTH_RADIUS_METERS};
pub use office::{evaluate_check_in, CheckInAssessment, CheckInRejection, OfficeLocation};
