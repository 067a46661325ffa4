use chrono::NaiveDate;
use serde::Serialize;

/// Row of `holidays`. A holiday without work center applies everywhere.
#[derive(Debug, Clone, Serialize)]
pub struct Holiday {
    pub id: i64,
    pub date: NaiveDate,
    pub name: String,
    pub work_center: Option<String>,
}

impl Holiday {
    pub fn applies_to(&self, centers: &[String]) -> bool {
        match &self.work_center {
            None => true,
            Some(c) => centers.iter().any(|wc| wc == c),
        }
    }
}
