use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use hrms_core::{AttendanceId, EmployeeId, Entity, OfficeId};

use crate::money::deserialize_amount;
use crate::Employee;

/// Registered office, including the check-in geofence.
///
/// The backend stores coordinates as decimal columns and sends them as
/// strings; they are kept verbatim here and parsed by the attendance policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub id: OfficeId,
    #[serde(default)]
    pub app_name: String,
    #[serde(deserialize_with = "deserialize_coordinate_text")]
    pub latitude: String,
    #[serde(deserialize_with = "deserialize_coordinate_text")]
    pub longitude: String,
    /// Allowed distance from the office, in meters.
    #[serde(deserialize_with = "deserialize_amount")]
    pub radius: f64,
    /// Worst acceptable GPS accuracy for a check-in, in meters.
    #[serde(deserialize_with = "deserialize_amount")]
    pub max_accuracy: f64,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl Entity for Office {
    type Id = OfficeId;

    fn id(&self) -> OfficeId {
        self.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

fn deserialize_coordinate_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(value) => value.to_string(),
        RawCoordinate::Text(text) => text,
    })
}

/// Daily attendance record of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: AttendanceId,
    pub employee_id: EmployeeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    pub date: NaiveDate,
    pub clock_in: String,
    #[serde(default)]
    pub clock_out: Option<String>,
    #[serde(default)]
    pub image_path: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub latitude: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub longitude: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub accuracy: f64,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Attendance {
    /// Checked in but not yet checked out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

impl Entity for Attendance {
    type Id = AttendanceId;

    fn id(&self) -> AttendanceId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_accepts_string_or_numeric_coordinates() {
        let json = r#"{
            "id": 1, "app_name": "HRMS", "latitude": "-6.2000000", "longitude": 106.816666,
            "radius": 100, "max_accuracy": "50", "start_time": "08:00:00", "end_time": "17:00:00"
        }"#;

        let office: Office = serde_json::from_str(json).unwrap();
        assert_eq!(office.latitude, "-6.2000000");
        assert_eq!(office.longitude, "106.816666");
        assert_eq!(office.max_accuracy, 50.0);
    }

    #[test]
    fn attendance_without_clock_out_is_open() {
        let json = r#"{
            "id": 10, "employee_id": 3, "date": "2025-10-14", "clock_in": "08:02:11",
            "clock_out": null, "image_path": "attendances/a.jpg",
            "latitude": -6.2, "longitude": 106.8, "accuracy": 12.5, "status": "present"
        }"#;

        let attendance: Attendance = serde_json::from_str(json).unwrap();
        assert!(attendance.is_open());
        assert_eq!(attendance.id(), AttendanceId::new(10));
    }
}
