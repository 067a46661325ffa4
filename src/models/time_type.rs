use serde::{Deserialize, Serialize};

/// Classification of a work session, chosen at clock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    Turno,        // regular shift
    Coordinacion, // coordination
    Formacion,    // training
    Sustitucion,  // substitution
    Otros,        // other
}

impl TimeType {
    pub fn code(&self) -> &'static str {
        match self {
            TimeType::Turno => "turno",
            TimeType::Coordinacion => "coordinacion",
            TimeType::Formacion => "formacion",
            TimeType::Sustitucion => "sustitucion",
            TimeType::Otros => "otros",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "turno" => Some(TimeType::Turno),
            "coordinacion" => Some(TimeType::Coordinacion),
            "formacion" => Some(TimeType::Formacion),
            "sustitucion" => Some(TimeType::Sustitucion),
            "otros" => Some(TimeType::Otros),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (any case, accents tolerated)
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code
            .trim()
            .to_lowercase()
            .replace('ó', "o")
            .replace('í', "i");
        TimeType::from_db_str(&normalized)
    }
}
