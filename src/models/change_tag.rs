use serde::{Deserialize, Serialize};

/// Provenance tag stored in `time_entries.changes`. Audit trail only: the
/// calculator never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTag {
    Edited,
    Eliminated,
}

impl ChangeTag {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ChangeTag::Edited => "edited",
            ChangeTag::Eliminated => "eliminated",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "edited" => Some(ChangeTag::Edited),
            "eliminated" => Some(ChangeTag::Eliminated),
            _ => None,
        }
    }
}
