use hrms_core::RoleId;

/// Roles granted access to admin-portal routes: 1 (admin) and 2 (super admin).
pub const ADMIN_CLASS_ROLES: [RoleId; 2] = [RoleId::new(1), RoleId::new(2)];

/// Authorization tier derived from a role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleClass {
    Admin,
    Standard,
}

impl RoleClass {
    /// Classify a role. Missing and unknown roles are `Standard`.
    pub fn of(role: Option<RoleId>) -> Self {
        match role {
            Some(role) if ADMIN_CLASS_ROLES.contains(&role) => Self::Admin,
            _ => Self::Standard,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl core::fmt::Display for RoleClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RoleClass::Admin => f.write_str("admin"),
            RoleClass::Standard => f.write_str("standard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_and_two_are_admin_class() {
        assert_eq!(RoleClass::of(Some(RoleId::new(1))), RoleClass::Admin);
        assert_eq!(RoleClass::of(Some(RoleId::new(2))), RoleClass::Admin);
        assert_eq!(RoleClass::of(Some(RoleId::new(3))), RoleClass::Standard);
        assert_eq!(RoleClass::of(Some(RoleId::new(0))), RoleClass::Standard);
        assert_eq!(RoleClass::of(Some(RoleId::new(-1))), RoleClass::Standard);
        assert_eq!(RoleClass::of(None), RoleClass::Standard);
    }
}
