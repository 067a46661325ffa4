use super::entry_type::EntryType;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// Absence categories an employee can plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlannerType {
    #[serde(rename = "Horas compensadas")]
    Compensated,
    #[serde(rename = "Horas vacaciones")]
    Vacation,
    #[serde(rename = "Horas asuntos propios")]
    Personal,
}

impl PlannerType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlannerType::Compensated => "Horas compensadas",
            PlannerType::Vacation => "Horas vacaciones",
            PlannerType::Personal => "Horas asuntos propios",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Horas compensadas" => Some(PlannerType::Compensated),
            "Horas vacaciones" => Some(PlannerType::Vacation),
            "Horas asuntos propios" => Some(PlannerType::Personal),
            _ => None,
        }
    }

    /// CLI codes: `compensated`, `vacation`, `personal`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "compensated" | "compensadas" => Some(PlannerType::Compensated),
            "vacation" | "vacaciones" => Some(PlannerType::Vacation),
            "personal" | "asuntos_propios" => Some(PlannerType::Personal),
            _ => PlannerType::from_db_str(code),
        }
    }
}

/// Row of `time_requests`: an employee asks for a missing or wrong punch to
/// be corrected.
#[derive(Debug, Clone, Serialize)]
pub struct TimeRequest {
    pub id: i64,
    pub employee_id: String,
    pub datetime: NaiveDateTime,
    pub entry_type: EntryType,
    /// Only set on clock-in requests.
    pub work_center: Option<String>,
    pub comment: String,
    pub status: RequestStatus,
    pub created_at: String,
}

/// Row of `planner_requests`.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerRequest {
    pub id: i64,
    pub employee_id: String,
    pub planner_type: PlannerType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comment: String,
    pub status: RequestStatus,
    pub created_at: String,
}

/// Which table a request id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RequestKind {
    Time,
    Planner,
}
