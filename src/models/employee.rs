use serde::{Deserialize, Serialize};

/// Row of `employee_profiles`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeProfile {
    pub id: String,
    pub fiscal_name: String,
    pub email: String,
    pub document_number: String,
    pub company_id: String,
    pub delegation: Option<String>,
    pub work_centers: Vec<String>, // ⇔ JSON array column
    pub is_active: bool,
}

impl EmployeeProfile {
    pub fn new(id: &str, fiscal_name: &str, company_id: &str) -> Self {
        Self {
            id: id.to_string(),
            fiscal_name: fiscal_name.to_string(),
            email: String::new(),
            document_number: String::new(),
            company_id: company_id.to_string(),
            delegation: None,
            work_centers: Vec::new(),
            is_active: true,
        }
    }

    pub fn works_at(&self, center: &str) -> bool {
        self.work_centers.iter().any(|c| c == center)
    }

    /// Resolve the work center of a new clock-in: the explicit one (must be
    /// assigned), or the only assigned center. `None` when ambiguous.
    pub fn resolve_work_center(&self, requested: Option<&str>) -> Option<String> {
        match requested {
            Some(c) if self.work_centers.is_empty() || self.works_at(c) => Some(c.to_string()),
            Some(_) => None,
            None if self.work_centers.len() == 1 => Some(self.work_centers[0].clone()),
            None => None,
        }
    }
}
