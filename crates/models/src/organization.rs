use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrms_core::{DepartmentId, Entity, RoleId};

/// Role as listed by the role management screen, with its member count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub role_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub count: u64,
}

impl Entity for RoleRecord {
    type Id = RoleId;

    fn id(&self) -> RoleId {
        self.id
    }
}

/// Department with its employee count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Department {
    type Id = DepartmentId;

    fn id(&self) -> DepartmentId {
        self.id
    }
}
