use serde::{Deserialize, Serialize};

/// Kind of punch recorded in `time_entries.entry_type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    ClockIn,
    BreakStart,
    BreakEnd,
    ClockOut,
}

impl EntryType {
    pub const ALL: [EntryType; 4] = [
        EntryType::ClockIn,
        EntryType::BreakStart,
        EntryType::BreakEnd,
        EntryType::ClockOut,
    ];

    /// Parse user input. Accepts the DB spelling plus short aliases
    /// (`in`, `out`, `pause`, `resume`).
    pub fn et_from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "clock_in" | "in" => Some(Self::ClockIn),
            "break_start" | "pause" => Some(Self::BreakStart),
            "break_end" | "resume" => Some(Self::BreakEnd),
            "clock_out" | "out" => Some(Self::ClockOut),
            _ => None,
        }
    }

    /// Short label used in tables.
    pub fn et_as_str(&self) -> &'static str {
        match self {
            EntryType::ClockIn => "in",
            EntryType::BreakStart => "pause",
            EntryType::BreakEnd => "resume",
            EntryType::ClockOut => "out",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::ClockIn => "clock_in",
            EntryType::BreakStart => "break_start",
            EntryType::BreakEnd => "break_end",
            EntryType::ClockOut => "clock_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "clock_in" => Some(EntryType::ClockIn),
            "break_start" => Some(EntryType::BreakStart),
            "break_end" => Some(EntryType::BreakEnd),
            "clock_out" => Some(EntryType::ClockOut),
            _ => None,
        }
    }

    pub fn is_clock_in(&self) -> bool {
        matches!(self, EntryType::ClockIn)
    }
}
