use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hrms_core::{EmployeeId, Entity, LeaveId, UserId};

use crate::{Employee, User};

/// Leave request. Dates travel as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    pub id: LeaveId,
    pub employee_id: EmployeeId,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub status: String,
    #[serde(default)]
    pub approved_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Leave {
    type Id = LeaveId;

    fn id(&self) -> LeaveId {
        self.id
    }
}
