//! Identity of the caller, passed explicitly to every scoped operation.

use crate::errors::{AppError, AppResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// An employee: sees only their own data.
    Employee,
    /// A company account: sees all its employees.
    Company,
    /// Supervisor of a delegation (regional grouping).
    DelegationSupervisor,
    /// Supervisor of a single work center.
    CenterSupervisor,
    /// Read-only inspector attached to a company.
    Inspector,
}

/// `id` is the employee id, company id, delegation name, work center
/// label or inspected company id, depending on the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub role: Role,
    pub id: String,
}

impl CurrentUser {
    pub fn new(role: Role, id: &str) -> Self {
        Self {
            role,
            id: id.to_string(),
        }
    }

    /// Parse `role:id` (e.g. `company:acme`, `employee:E001`, `center:Madrid`).
    pub fn parse(s: &str) -> AppResult<Self> {
        let (role, id) = s
            .split_once(':')
            .ok_or_else(|| AppError::InvalidUser(s.to_string()))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::InvalidUser(s.to_string()));
        }

        let role = match role.trim().to_lowercase().as_str() {
            "employee" => Role::Employee,
            "company" => Role::Company,
            "delegation" => Role::DelegationSupervisor,
            "center" => Role::CenterSupervisor,
            "inspector" => Role::Inspector,
            _ => return Err(AppError::InvalidUser(s.to_string())),
        };

        Ok(Self::new(role, id))
    }

    /// Inspectors only read.
    pub fn can_write(&self) -> bool {
        self.role != Role::Inspector
    }

    /// Supervisors and companies resolve requests; employees only file them.
    pub fn can_resolve(&self) -> bool {
        matches!(
            self.role,
            Role::Company | Role::DelegationSupervisor | Role::CenterSupervisor
        )
    }

    pub fn is_company(&self) -> bool {
        self.role == Role::Company
    }

    pub fn role_str(&self) -> &'static str {
        match self.role {
            Role::Employee => "employee",
            Role::Company => "company",
            Role::DelegationSupervisor => "delegation",
            Role::CenterSupervisor => "center",
            Role::Inspector => "inspector",
        }
    }
}

impl fmt::Display for CurrentUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role_str(), self.id)
    }
}
