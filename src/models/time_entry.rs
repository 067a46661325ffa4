use super::{change_tag::ChangeTag, entry_type::EntryType, time_type::TimeType};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Storage format of `time_entries.timestamp` (local wall-clock time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeEntry {
    pub id: i64,                                   // ⇔ time_entries.id
    pub employee_id: String,                       // ⇔ time_entries.employee_id
    pub entry_type: EntryType,                     // ⇔ time_entries.entry_type
    pub timestamp: NaiveDateTime,                  // ⇔ time_entries.timestamp
    pub time_type: Option<TimeType>,               // only on clock_in
    pub work_center: Option<String>,               // only on clock_in
    pub is_active: bool,                           // soft-delete flag
    pub changes: Option<ChangeTag>,                // audit tag
    pub original_timestamp: Option<NaiveDateTime>, // value before the first edit
    pub created_at: String,                        // ISO8601
}

impl TimeEntry {
    /// Build a new, not yet persisted entry (`id = 0`).
    pub fn new(employee_id: &str, entry_type: EntryType, timestamp: NaiveDateTime) -> Self {
        Self {
            id: 0,
            employee_id: employee_id.to_string(),
            entry_type,
            timestamp,
            time_type: None,
            work_center: None,
            is_active: true,
            changes: None,
            original_timestamp: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Attach the session classification. Ignored for anything but clock-ins.
    pub fn with_time_type(mut self, time_type: Option<TimeType>) -> Self {
        if self.entry_type.is_clock_in() {
            self.time_type = time_type;
        }
        self
    }

    /// Attach the work center. Ignored for anything but clock-ins.
    pub fn with_work_center(mut self, work_center: Option<String>) -> Self {
        if self.entry_type.is_clock_in() {
            self.work_center = work_center;
        }
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
