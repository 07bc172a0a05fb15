use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrms_core::{EmployeeId, Entity, PayrollId, SalaryId};

use crate::money::{deserialize_amount, deserialize_optional_amount};
use crate::Employee;

/// Salary structure assigned to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub id: SalaryId,
    pub employee_id: EmployeeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub base_salary: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub allowance: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub deduction: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub overtime_rate: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Salary {
    type Id = SalaryId;

    fn id(&self) -> SalaryId {
        self.id
    }
}

/// Payroll status. Values other than `pending`/`paid` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PayrollStatus {
    Pending,
    Paid,
    Other(String),
}

impl PayrollStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PayrollStatus::Pending => "pending",
            PayrollStatus::Paid => "paid",
            PayrollStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for PayrollStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => PayrollStatus::Pending,
            "paid" => PayrollStatus::Paid,
            _ => PayrollStatus::Other(raw),
        }
    }
}

impl From<PayrollStatus> for String {
    fn from(status: PayrollStatus) -> Self {
        match status {
            PayrollStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// One payroll run for one employee and period (`"2025-10"` or `"2025-10-01"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    pub id: PayrollId,
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub salary_id: Option<SalaryId>,
    pub period: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub base_salary: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub allowance: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub overtime_hours: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub overtime_pay: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub deduction: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_salary: f64,
    pub status: PayrollStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Salary>,
    /// Server-side accessor, only present when the resource includes it.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub calculated_total: Option<f64>,
}

impl Payroll {
    /// Total recomputed from the components: base + allowance + overtime pay - deduction.
    pub fn expected_total(&self) -> f64 {
        self.base_salary + self.allowance + self.overtime_pay - self.deduction
    }

    /// Whether the stored total agrees with its components (to the rupiah).
    pub fn is_consistent(&self) -> bool {
        (self.total_salary - self.expected_total()).abs() < 1.0
    }
}

impl Entity for Payroll {
    type Id = PayrollId;

    fn id(&self) -> PayrollId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(total: &str) -> String {
        format!(
            r#"{{
                "id": 1, "employee_id": 3, "salary_id": 9, "period": "2025-10",
                "base_salary": "5000000.00", "allowance": 750000,
                "overtime_hours": 4, "overtime_pay": "200000",
                "deduction": 150000, "total_salary": {total},
                "status": "pending"
            }}"#
        )
    }

    #[test]
    fn decodes_decimal_strings_and_numbers() {
        let payroll: Payroll = serde_json::from_str(&sample_json("5800000")).unwrap();
        assert_eq!(payroll.base_salary, 5_000_000.0);
        assert_eq!(payroll.overtime_pay, 200_000.0);
        assert_eq!(payroll.status, PayrollStatus::Pending);
        assert_eq!(payroll.calculated_total, None);
    }

    #[test]
    fn expected_total_matches_component_sum() {
        let payroll: Payroll = serde_json::from_str(&sample_json("5800000")).unwrap();
        assert_eq!(payroll.expected_total(), 5_800_000.0);
        assert!(payroll.is_consistent());

        let skewed: Payroll = serde_json::from_str(&sample_json("6000000")).unwrap();
        assert!(!skewed.is_consistent());
    }

    #[test]
    fn unknown_status_keeps_its_text() {
        let json = sample_json("5800000").replace("\"pending\"", "\"cancelled\"");
        let payroll: Payroll = serde_json::from_str(&json).unwrap();
        assert_eq!(payroll.status, PayrollStatus::Other("cancelled".to_string()));

        let encoded = serde_json::to_value(&payroll).unwrap();
        assert_eq!(encoded["status"], "cancelled");
    }

    #[test]
    fn known_statuses_encode_lowercase() {
        assert_eq!(serde_json::to_string(&PayrollStatus::Paid).unwrap(), r#""paid""#);
        assert_eq!(serde_json::from_str::<PayrollStatus>(r#""paid""#).unwrap(), PayrollStatus::Paid);
    }

    #[test]
    fn garbage_amount_is_rejected() {
        let json = sample_json("\"lots\"");
        assert!(serde_json::from_str::<Payroll>(&json).is_err());
    }
}
