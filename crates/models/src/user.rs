use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hrms_core::{DepartmentId, EmployeeId, Entity, RoleId, UserId};

/// Login account as returned by `/login` and the user endpoints.
///
/// `role_id` is optional on the wire: older payloads and some list endpoints
/// omit it. A missing role is never treated as privileged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Display name of the role (e.g. "Admin"). Authorization uses `role_id`.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub role_id: Option<RoleId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

impl User {
    /// Minimal record, mostly useful for tests and fixtures.
    pub fn new(id: UserId, name: impl Into<String>, role_id: Option<RoleId>) -> Self {
        Self {
            id,
            name: name.into(),
            email: String::new(),
            role: String::new(),
            role_id,
            created_at: None,
            employee: None,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Department summary embedded in an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Employee profile attached to a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
    pub employee_code: String,
    pub full_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> EmployeeId {
        self.id
    }
}
